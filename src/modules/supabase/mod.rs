//! Supabase integration
//!
//! The hosted database is reached through its PostgREST endpoint
//! (`{SUPABASE_URL}/rest/v1/{table}`). Consumers depend on the
//! [`RecordStore`] trait and receive a [`SupabaseRecordStore`] at start-up.

mod postgrest_client;
mod record_store;

pub use postgrest_client::PostgrestClient;
pub use record_store::{RecordStore, SupabaseRecordStore, CHECKLIST_ITEMS_TABLE, SITES_TABLE};
