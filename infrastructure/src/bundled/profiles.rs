//! Sample profiles for seeding the `perfis` table

use crate::supabase::PerfilRow;
use dpc_domain::Profile;

const EMBEDDED: &str = include_str!("../../data/perfis.json");

/// The five bundled profiles: perfeccionista, culpado, ansioso, vitimista,
/// controlador
pub fn bundled_profiles() -> Result<Vec<Profile>, serde_json::Error> {
    let rows: Vec<PerfilRow> = serde_json::from_str(EMBEDDED)?;
    Ok(rows.into_iter().map(Profile::from).collect())
}
