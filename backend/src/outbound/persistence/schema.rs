//! Diesel table definitions. Keep in sync with `migrations/`.

diesel::table! {
    contracts (id) {
        id -> Int8,
        name -> Text,
        start_date -> Timestamptz,
        end_date -> Timestamptz,
    }
}
