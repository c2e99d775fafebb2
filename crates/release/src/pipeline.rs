//! Drives a single release from lookup to delivery.

use crate::facades::{format_release_message, FormatOptions};
use crate::models::ReleaseParameters;
use crate::PipelineError;
use reelbot_telegram_client::message::MessageData;
use reelbot_telegram_client::TelegramClient;
use reelbot_tmdb_client::{MetadataClient, MovieProvider};
use tracing::{error, info, warn};

/// Where a [ReleasePipeline] is in its run. States only ever move forward (in declaration
/// order); [PipelineState::Done] and [PipelineState::Failed] are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Init,
    Resolving,
    Formatting,
    Sending,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn can_advance_to(self, next: PipelineState) -> bool {
        !self.is_terminal() && next > self
    }
}

/// Resolves, formats and (unless it has no sender) delivers one release.
pub struct ReleasePipeline<P: MovieProvider, T: TelegramClient> {
    metadata: MetadataClient<P>,
    sender: Option<T>,
    options: FormatOptions,
}

struct Progress {
    state: PipelineState,
}

impl Progress {
    fn advance(&mut self, next: PipelineState) {
        if self.state.can_advance_to(next) {
            info!(from = ?self.state, to = ?next, "Pipeline state changed.");
            self.state = next;
        } else {
            warn!(from = ?self.state, to = ?next, "Ignoring backwards pipeline transition.");
        }
    }
}

impl<P: MovieProvider, T: TelegramClient> ReleasePipeline<P, T> {
    /// Without a `sender` the pipeline stops after formatting, which is how dry runs work.
    pub fn new(metadata: MetadataClient<P>, sender: Option<T>, options: FormatOptions) -> Self {
        ReleasePipeline {
            metadata,
            sender,
            options,
        }
    }

    /// Announce `release`, returning the message that was (or, for dry runs, would have been)
    /// sent. Nothing is sent unless the movie was resolved.
    pub async fn run(self, release: &ReleaseParameters) -> Result<MessageData, PipelineError> {
        info!(
            title = %release.title,
            year = release.year,
            group = %release.group,
            indexer = %release.indexer,
            torrent_name = %release.torrent_name,
            file_size = %release.file_size,
            external_id = ?release.external_id,
            "Received release."
        );
        let mut progress = Progress {
            state: PipelineState::Init,
        };

        let result = self.process(release, &mut progress).await;
        match &result {
            Ok(_) => progress.advance(PipelineState::Done),
            Err(e) => {
                error!(
                    error_kind = e.kind(),
                    error = %e,
                    title = %release.title,
                    year = release.year,
                    group = %release.group,
                    indexer = %release.indexer,
                    "Failed to announce release."
                );
                progress.advance(PipelineState::Failed);
            }
        }

        result
    }

    async fn process(
        self,
        release: &ReleaseParameters,
        progress: &mut Progress,
    ) -> Result<MessageData, PipelineError> {
        let ReleasePipeline {
            metadata,
            sender,
            options,
        } = self;

        progress.advance(PipelineState::Resolving);
        let record = metadata.resolve(&release.lookup_request()).await?;

        progress.advance(PipelineState::Formatting);
        let message = format_release_message(&record, release, &options);

        match sender {
            Some(sender) => {
                progress.advance(PipelineState::Sending);
                sender.send_message(&message).await?;
            }
            None => info!("No sender configured; skipping delivery."),
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use crate::PipelineState;

    #[test]
    pub fn can_advance_to_allows_only_forward_moves() {
        assert!(PipelineState::Init.can_advance_to(PipelineState::Resolving));
        assert!(PipelineState::Resolving.can_advance_to(PipelineState::Failed));
        assert!(PipelineState::Formatting.can_advance_to(PipelineState::Done));
        assert!(!PipelineState::Sending.can_advance_to(PipelineState::Resolving));
        assert!(!PipelineState::Formatting.can_advance_to(PipelineState::Formatting));
    }

    #[test]
    pub fn terminal_states_cannot_advance() {
        assert!(!PipelineState::Done.can_advance_to(PipelineState::Failed));
        assert!(!PipelineState::Failed.can_advance_to(PipelineState::Done));
    }
}
