//! Store ports backed by Supabase tables

use super::client::SupabaseClient;
use super::rows::{
    AlternativaRow, OPTIONS_TABLE, PROFILES_TABLE, PerfilRow, PerguntaRow, QUESTIONS_TABLE,
    RESPONSES_TABLE, RespostaRow,
};
use async_trait::async_trait;
use dpc_application::{
    OptionRecord, ProfileStore, QuestionRecord, QuestionStore, ResponseRecord, ResponseStore,
    StoreError,
};
use dpc_domain::Profile;

#[async_trait]
impl QuestionStore for SupabaseClient {
    async fn count_questions(&self) -> Result<usize, StoreError> {
        Ok(self.count(QUESTIONS_TABLE, "id").await?)
    }

    async fn count_options(&self) -> Result<usize, StoreError> {
        Ok(self.count(OPTIONS_TABLE, "id").await?)
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        let rows: Vec<PerguntaRow> = self
            .select(QUESTIONS_TABLE, &[("select", "id,texto"), ("order", "id.asc")])
            .await?;
        Ok(rows.into_iter().map(QuestionRecord::from).collect())
    }

    async fn list_options(&self) -> Result<Vec<OptionRecord>, StoreError> {
        let rows: Vec<AlternativaRow> = self
            .select(
                OPTIONS_TABLE,
                &[("select", "id,pergunta_id,texto,perfis"), ("order", "id.asc")],
            )
            .await?;
        Ok(rows.into_iter().map(OptionRecord::from).collect())
    }

    async fn upsert_question(&self, record: &QuestionRecord) -> Result<(), StoreError> {
        Ok(self
            .upsert(QUESTIONS_TABLE, "id", &PerguntaRow::from(record))
            .await?)
    }

    async fn upsert_option(&self, record: &OptionRecord) -> Result<(), StoreError> {
        Ok(self
            .upsert(OPTIONS_TABLE, "id", &AlternativaRow::from(record))
            .await?)
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn profiles_by_slug(&self, slug: &str) -> Result<Vec<Profile>, StoreError> {
        let filter = format!("eq.{}", slug);
        let rows: Vec<PerfilRow> = self
            .select(PROFILES_TABLE, &[("select", "*"), ("slug", filter.as_str())])
            .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        Ok(self
            .upsert(PROFILES_TABLE, "slug", &PerfilRow::from(profile))
            .await?)
    }

    async fn count_profiles(&self) -> Result<usize, StoreError> {
        Ok(self.count(PROFILES_TABLE, "slug").await?)
    }
}

#[async_trait]
impl ResponseStore for SupabaseClient {
    async fn insert_responses(&self, records: &[ResponseRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }
        let rows: Vec<RespostaRow> = records.iter().map(RespostaRow::from).collect();
        Ok(self.insert(RESPONSES_TABLE, rows.as_slice()).await?)
    }
}
