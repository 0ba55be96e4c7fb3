//! Authentication glue for the listas server.
//!
//! Sign-in is delegated to the hosted auth service. This module holds the
//! HTTP client for it; the workflow that drives a login lives in
//! `listas_platform_access::login`.

pub mod supabase;

pub use supabase::SupabaseClient;
