//! Diesel schema for user persistence.

diesel::table! {
    /// User records with invitation fields and task membership sets.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Email address, unique across the directory.
        #[max_length = 255]
        email -> Varchar,
        /// One-time invitation code, unique across the directory.
        #[max_length = 64]
        joining_id -> Varchar,
        /// Organization name.
        #[max_length = 255]
        organization -> Varchar,
        /// Admin role flag.
        is_admin -> Bool,
        /// Full name, null until signup completes.
        #[max_length = 255]
        name -> Nullable<Varchar>,
        /// Employee ID, null until signup completes.
        #[max_length = 255]
        employee_id -> Nullable<Varchar>,
        /// Phone number, null until signup completes.
        #[max_length = 64]
        phone_number -> Nullable<Varchar>,
        /// Assigned membership set as a JSON array of task UUIDs.
        task_assigned -> Jsonb,
        /// In-progress membership set as a JSON array of task UUIDs.
        task_in_progress -> Jsonb,
        /// Completed membership set as a JSON array of task UUIDs.
        task_completed -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
