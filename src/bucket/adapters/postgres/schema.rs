//! Diesel schema for bucket item persistence.

diesel::table! {
    /// Standalone uploaded file records.
    bucket_items (id) {
        /// Internal item identifier.
        id -> Uuid,
        /// Item name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Tags as a JSON array of strings.
        tags -> Jsonb,
        /// Uploader reference.
        uploaded_by -> Uuid,
        /// Stored file reference payload.
        file -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
