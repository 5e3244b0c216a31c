// Ids, references and ratings are 64-bit, like SQLite INTEGER values.

diesel::table! {
    attendance (id) {
        id -> BigInt,
        student_id -> BigInt,
        event_id -> BigInt,
        present -> Bool,
    }
}

diesel::table! {
    events (id) {
        id -> BigInt,
        name -> Text,
        #[sql_name = "type"]
        type_ -> Text,
        date -> Text,
    }
}

diesel::table! {
    feedback (id) {
        id -> BigInt,
        student_id -> BigInt,
        event_id -> BigInt,
        rating -> BigInt,
        comment -> Nullable<Text>,
    }
}

diesel::table! {
    registrations (id) {
        id -> BigInt,
        student_id -> BigInt,
        event_id -> BigInt,
    }
}

diesel::table! {
    students (id) {
        id -> BigInt,
        name -> Text,
        email -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    attendance,
    events,
    feedback,
    registrations,
    students,
);
