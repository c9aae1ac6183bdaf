//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with lifecycle status and first-entry timestamps.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Task description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// One-way archive flag.
        archived -> Bool,
        /// Priority, orthogonal to status.
        #[max_length = 50]
        priority -> Varchar,
        /// Assigner reference, null once scrubbed.
        assigned_by -> Nullable<Uuid>,
        /// Assignee reference, null once scrubbed.
        assigned_to -> Nullable<Uuid>,
        /// Assignment timestamp, stamped at creation.
        assigned_date -> Timestamptz,
        /// First-entry in-progress timestamp.
        in_progress_date -> Nullable<Timestamptz>,
        /// First-entry completion timestamp.
        completion_date -> Nullable<Timestamptz>,
        /// Attached file reference payload.
        attachment -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
