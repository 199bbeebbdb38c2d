//! Wire rows of the Supabase tables
//!
//! Column names follow the deployed schema (`perguntas`, `alternativas`,
//! `perfis`, `respostas`); the conversions map them onto port records and
//! domain entities.

use dpc_application::{OptionRecord, QuestionRecord, ResponseRecord};
use dpc_domain::{Profile, UserMetadata};
use serde::{Deserialize, Serialize};

pub const QUESTIONS_TABLE: &str = "perguntas";
pub const OPTIONS_TABLE: &str = "alternativas";
pub const PROFILES_TABLE: &str = "perfis";
pub const RESPONSES_TABLE: &str = "respostas";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerguntaRow {
    pub id: String,
    pub texto: String,
}

impl From<&QuestionRecord> for PerguntaRow {
    fn from(record: &QuestionRecord) -> Self {
        Self {
            id: record.id.clone(),
            texto: record.text.clone(),
        }
    }
}

impl From<PerguntaRow> for QuestionRecord {
    fn from(row: PerguntaRow) -> Self {
        Self {
            id: row.id,
            text: row.texto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativaRow {
    pub id: String,
    pub pergunta_id: String,
    pub texto: String,
    /// Nullable in the schema
    #[serde(default, deserialize_with = "null_as_empty")]
    pub perfis: Vec<String>,
}

impl From<&OptionRecord> for AlternativaRow {
    fn from(record: &OptionRecord) -> Self {
        Self {
            id: record.id.clone(),
            pergunta_id: record.question_id.clone(),
            texto: record.text.clone(),
            perfis: record.tags.clone(),
        }
    }
}

impl From<AlternativaRow> for OptionRecord {
    fn from(row: AlternativaRow) -> Self {
        Self {
            id: row.id,
            question_id: row.pergunta_id,
            text: row.texto,
            tags: row.perfis,
        }
    }
}

/// A `perfis` row; every descriptive column is nullable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerfilRow {
    pub slug: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub nome: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub descricao: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub emocao_predominante: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub influencia: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub destino: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub licao_espiritual: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub demonio_associado: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub operacao: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub artimanha: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub refugio: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub personagem_biblico: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub exaltacao: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub formacao: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub dores: Vec<String>,
}

impl From<&Profile> for PerfilRow {
    fn from(p: &Profile) -> Self {
        Self {
            slug: p.slug.clone(),
            nome: p.name.clone(),
            descricao: p.description.clone(),
            emocao_predominante: p.predominant_emotion.clone(),
            influencia: p.influence.clone(),
            destino: p.destiny.clone(),
            licao_espiritual: p.spiritual_lesson.clone(),
            demonio_associado: p.associated_spirit.clone(),
            operacao: p.operation.clone(),
            artimanha: p.stratagem.clone(),
            refugio: p.refuge.clone(),
            personagem_biblico: p.biblical_character.clone(),
            exaltacao: p.exaltation.clone(),
            formacao: p.formation.clone(),
            dores: p.pains.clone(),
        }
    }
}

impl From<PerfilRow> for Profile {
    fn from(row: PerfilRow) -> Self {
        Self {
            slug: row.slug,
            name: row.nome,
            description: row.descricao,
            predominant_emotion: row.emocao_predominante,
            influence: row.influencia,
            destiny: row.destino,
            spiritual_lesson: row.licao_espiritual,
            associated_spirit: row.demonio_associado,
            operation: row.operacao,
            stratagem: row.artimanha,
            refuge: row.refugio,
            biblical_character: row.personagem_biblico,
            exaltation: row.exaltacao,
            formation: row.formacao,
            pains: row.dores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespostaRow {
    pub user_id: String,
    pub pergunta_id: String,
    pub resposta: String,
    pub perfis: Vec<String>,
}

impl From<&ResponseRecord> for RespostaRow {
    fn from(record: &ResponseRecord) -> Self {
        Self {
            user_id: record.user_id.as_str().to_string(),
            pergunta_id: record.question_id.clone(),
            resposta: record.chosen_text.clone(),
            perfis: record.tags.clone(),
        }
    }
}

/// Sign-up metadata stored on the auth user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMetadataRow {
    pub nome: String,
    pub sobrenome: String,
    pub whatsapp: String,
    /// ISO-8601 date
    pub data_nascimento: Option<String>,
    pub sexo: Option<String>,
    pub estado: Option<String>,
    pub cidade: Option<String>,
    pub congregacao: Option<String>,
}

impl From<&UserMetadata> for UserMetadataRow {
    fn from(m: &UserMetadata) -> Self {
        Self {
            nome: m.first_name.clone(),
            sobrenome: m.last_name.clone(),
            whatsapp: m.whatsapp.clone(),
            data_nascimento: m.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
            sexo: m.gender.map(|g| g.as_str().to_string()),
            estado: m.state.clone(),
            cidade: m.city.clone(),
            congregacao: m.congregation.clone(),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dpc_application::UserId;
    use dpc_domain::Gender;

    #[test]
    fn test_option_row_wire_names() {
        let record = OptionRecord {
            id: "p01a".into(),
            question_id: "p01".into(),
            text: "Sim".into(),
            tags: vec!["ansioso".into()],
        };
        let json = serde_json::to_value(AlternativaRow::from(&record)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p01a",
                "pergunta_id": "p01",
                "texto": "Sim",
                "perfis": ["ansioso"]
            })
        );
    }

    #[test]
    fn test_option_row_with_null_tags() {
        let row: AlternativaRow = serde_json::from_str(
            r#"{"id":"p01a","pergunta_id":"p01","texto":"Sim","perfis":null}"#,
        )
        .unwrap();
        assert!(OptionRecord::from(row).tags.is_empty());
    }

    #[test]
    fn test_profile_row_with_nulls_and_extra_columns() {
        let row: PerfilRow = serde_json::from_str(
            r#"{
                "id": "8c1f",
                "slug": "culpado",
                "nome": "O Culpado",
                "descricao": null,
                "dores": ["Vergonha crônica"],
                "created_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        let profile = Profile::from(row);
        assert_eq!(profile.slug, "culpado");
        assert_eq!(profile.name, "O Culpado");
        assert_eq!(profile.description, "");
        assert_eq!(profile.pains, vec!["Vergonha crônica".to_string()]);
    }

    #[test]
    fn test_response_row_wire_names() {
        let record = ResponseRecord {
            user_id: UserId::new("u-1"),
            question_id: "p02".into(),
            chosen_text: "Às vezes".into(),
            tags: vec!["culpado".into(), "vitimista".into()],
        };
        let json = serde_json::to_value(RespostaRow::from(&record)).unwrap();
        assert_eq!(json["user_id"], "u-1");
        assert_eq!(json["pergunta_id"], "p02");
        assert_eq!(json["resposta"], "Às vezes");
        assert_eq!(json["perfis"][1], "vitimista");
    }

    #[test]
    fn test_metadata_row() {
        let metadata = UserMetadata {
            first_name: "Maria".into(),
            last_name: "Silva".into(),
            whatsapp: "(19) 98765-4321".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 15),
            gender: Some(Gender::Feminino),
            state: Some("SP".into()),
            city: None,
            congregation: None,
        };
        let json = serde_json::to_value(UserMetadataRow::from(&metadata)).unwrap();
        assert_eq!(json["nome"], "Maria");
        assert_eq!(json["data_nascimento"], "1990-03-15");
        assert_eq!(json["sexo"], "feminino");
        assert!(json["cidade"].is_null());
    }
}
