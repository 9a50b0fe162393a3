//! Text lookup service.
//!
//! Stateless over the repository: every call validates the requested
//! language against current repository contents, resolves the lookup and
//! maps absence to domain errors. Repository failures never leak detail to
//! the client; they are logged and surfaced as internal errors.

use std::sync::Arc;

use tracing::instrument;

use crate::http::error::{ApiError, ApiResult};
use crate::models::Texts;
use crate::observability::RequestContext;
use crate::repository::{RepositoryError, TextRepository};

/// Resolves `(key | group, language)` into translated texts.
pub struct TextService {
    repository: Arc<dyn TextRepository>,
}

impl TextService {
    pub fn new(repository: Arc<dyn TextRepository>) -> Self {
        Self { repository }
    }

    /// Returns `{key: value}` for a single text.
    ///
    /// An unsupported language is a client error; a missing text is not
    /// found.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.id))]
    pub async fn get_text_by_key(
        &self,
        ctx: &RequestContext,
        key: &str,
        language: &str,
    ) -> ApiResult<Texts> {
        self.assert_language_support(ctx, language).await?;

        let text = self
            .repository
            .find_text_by_key(key, language)
            .await
            .map_err(|err| self.repository_failure(ctx, "find_text_by_key", err))?
            .ok_or_else(|| {
                ApiError::not_found(format!("No such text: {key}")).with_request_id(&ctx.id)
            })?;

        Ok(Texts::from_iter([(text.key, text.value)]))
    }

    /// Returns the translated texts of a group as `{key: value, ...}`.
    ///
    /// Member keys without a translation in the requested language are
    /// omitted; partial results are success, not an error. The language is
    /// validated before the group is resolved.
    #[instrument(skip(self, ctx), fields(request_id = %ctx.id))]
    pub async fn get_text_by_group(
        &self,
        ctx: &RequestContext,
        group_id: &str,
        language: &str,
    ) -> ApiResult<Texts> {
        self.assert_language_support(ctx, language).await?;

        let group = self
            .repository
            .find_group(group_id)
            .await
            .map_err(|err| self.repository_failure(ctx, "find_group", err))?
            .ok_or_else(|| {
                ApiError::not_found(format!("No such group: {group_id}")).with_request_id(&ctx.id)
            })?;

        let texts = self
            .repository
            .find_texts_by_keys(&group.keys, language)
            .await
            .map_err(|err| self.repository_failure(ctx, "find_texts_by_keys", err))?;

        Ok(texts.into_iter().map(|t| (t.key, t.value)).collect())
    }

    async fn assert_language_support(
        &self,
        ctx: &RequestContext,
        language: &str,
    ) -> ApiResult<()> {
        let found = self
            .repository
            .find_language(language)
            .await
            .map_err(|err| self.repository_failure(ctx, "find_language", err))?;

        match found {
            Some(_) => Ok(()),
            None => Err(
                ApiError::bad_request(format!("Unsupported language: {language}"))
                    .with_request_id(&ctx.id),
            ),
        }
    }

    fn repository_failure(
        &self,
        ctx: &RequestContext,
        operation: &str,
        err: RepositoryError,
    ) -> ApiError {
        tracing::error!(
            request_id = %ctx.id,
            operation = operation,
            error = %err,
            "repository call failed"
        );
        ApiError::internal("Internal server error").with_request_id(&ctx.id)
    }
}
