//! Supabase adapter
//!
//! A single [`SupabaseClient`] implements every remote port:
//! [`QuestionStore`](dpc_application::QuestionStore),
//! [`ProfileStore`](dpc_application::ProfileStore),
//! [`ResponseStore`](dpc_application::ResponseStore),
//! [`AuthPort`](dpc_application::AuthPort) and
//! [`CurrentUser`](dpc_application::CurrentUser). Signing in stores the
//! session on the client, so later table writes carry the user's token.

mod auth;
pub mod client;
pub mod error;
mod rows;
mod tables;

pub use client::{SupabaseClient, parse_content_range_total};
pub use error::SupabaseError;
pub use rows::{
    AlternativaRow, OPTIONS_TABLE, PROFILES_TABLE, PerfilRow, PerguntaRow, QUESTIONS_TABLE,
    RESPONSES_TABLE, RespostaRow, UserMetadataRow,
};
