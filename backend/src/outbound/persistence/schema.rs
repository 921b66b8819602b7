//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Lower-cased address; unique (`users_email_key`).
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Category registry.
    ///
    /// `id` is an identity column; values are never reused.
    categories (id) {
        id -> Int4,
        name -> Varchar,
        item_range -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Outstanding password reset grants keyed by token digest.
    password_resets (token_digest) {
        /// Hex SHA-256 of the mailed token.
        token_digest -> Varchar,
        user_id -> Int4,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(password_resets -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(categories, password_resets, users);
