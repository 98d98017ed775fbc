//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema --schema ebox` after changing a migration.

diesel::table! {
    /// User accounts and their credentials.
    ///
    /// `id` is an identity column assigned by PostgreSQL. `email` carries the
    /// `users_email_key` unique constraint.
    ebox.users (id) {
        /// Primary key, generated on insert.
        id -> Int8,
        /// Login email, unique and stored as submitted.
        email -> Text,
        /// bcrypt hash of the password; never the plaintext.
        password -> Text,
        /// Given name.
        first_name -> Text,
        /// Family name.
        last_name -> Text,
        /// Optional avatar image location.
        avatar_url -> Nullable<Text>,
    }
}
