//! Batch orchestrator

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use super::summary::BatchSummary;
use crate::domain::{
    DomainError, EmailSender, EmailTemplate, Identity, Roster, RosterMember, SignedToken,
    TokenRecord,
};
use crate::infrastructure::auth::CredentialIssuer;
use crate::infrastructure::render::MessageRenderer;

/// What a batch run does with each issued credential
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Issue credentials and report them, nothing else
    DryRun,
    /// Issue credentials and write token records to a file
    FileOutput(PathBuf),
    /// Issue, render and email every credential
    #[default]
    LiveSend,
}

impl RunMode {
    /// Select a mode from command-line flags; either flag suppresses sending
    pub fn from_flags(dry_run: bool, output: Option<PathBuf>) -> Self {
        match (dry_run, output) {
            (true, _) => Self::DryRun,
            (false, Some(path)) => Self::FileOutput(path),
            (false, None) => Self::LiveSend,
        }
    }

    pub fn dispatches(&self) -> bool {
        matches!(self, Self::LiveSend)
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DryRun => write!(f, "dry-run"),
            Self::FileOutput(path) => write!(f, "file-output ({})", path.display()),
            Self::LiveSend => write!(f, "live-send"),
        }
    }
}

/// Walks a roster and issues, renders and dispatches one credential per member.
///
/// Members are handled strictly one after another. A failure for one member
/// never stops the batch; only configuration errors do, and those are checked
/// before the first member.
pub struct BatchOrchestrator {
    issuer: CredentialIssuer,
    renderer: MessageRenderer,
    template: Option<EmailTemplate>,
    sender: Option<Arc<dyn EmailSender>>,
}

impl BatchOrchestrator {
    pub fn new(issuer: CredentialIssuer, renderer: MessageRenderer) -> Self {
        Self {
            issuer,
            renderer,
            template: None,
            sender: None,
        }
    }

    /// Use `template` for rendering; `None` selects the fallback document
    pub fn with_template(mut self, template: Option<EmailTemplate>) -> Self {
        self.template = template;
        self
    }

    pub fn with_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Run the batch over `roster`, restricted to members whose email is
    /// exactly `only_email` when given.
    pub async fn run(
        &self,
        roster: &Roster,
        mode: &RunMode,
        only_email: Option<&str>,
    ) -> Result<BatchSummary, DomainError> {
        let sender = if mode.dispatches() {
            Some(self.sender.as_deref().ok_or_else(|| {
                DomainError::configuration("Live-send mode requires a configured email sender")
            })?)
        } else {
            None
        };

        info!(mode = %mode, teams = roster.teams().len(), "Starting batch");

        let mut summary = BatchSummary::default();
        let mut records = Vec::new();

        for team in roster.teams() {
            info!(team = %team.team_name, "Processing team");
            let mut team_touched = false;

            for member in &team.members {
                if only_email.is_some_and(|email| !member.has_email(email)) {
                    continue;
                }

                let (identity, token) = match self.issue(member) {
                    Ok(issued) => issued,
                    Err(e) => {
                        warn!(
                            team = %team.team_name,
                            email = member.email.as_deref().unwrap_or("<missing>"),
                            error = %e,
                            "Skipping member"
                        );
                        summary.skipped += 1;
                        continue;
                    }
                };

                summary.processed += 1;
                team_touched = true;
                info!(
                    name = %identity.name_zh(),
                    email = %identity.email(),
                    "Generated token"
                );

                if let RunMode::FileOutput(_) = mode {
                    let login_url = self.renderer.login_url(&token);
                    records.push(TokenRecord::new(&identity, token.clone(), login_url));
                }

                if let Some(sender) = sender {
                    let message = self
                        .renderer
                        .render(&identity, &token, self.template.as_ref());

                    let result = sender.send(&identity, &message).await;
                    if result.is_delivered() {
                        summary.delivered += 1;
                    } else {
                        summary.failed += 1;
                        summary
                            .failed_recipients
                            .push((identity.email().to_string(), result));
                    }
                }
            }

            if team_touched {
                summary.teams += 1;
            }
        }

        if let RunMode::FileOutput(path) = mode {
            match write_token_records(path, &records).await {
                Ok(()) => {
                    info!(path = %path.display(), count = records.len(), "Tokens saved");
                    summary.output_path = Some(path.clone());
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Error saving tokens to file");
                    summary.output_error = Some(e.to_string());
                }
            }
        }

        info!(
            processed = summary.processed,
            teams = summary.teams,
            skipped = summary.skipped,
            delivered = summary.delivered,
            failed = summary.failed,
            "Batch complete"
        );

        Ok(summary)
    }

    fn issue(&self, member: &RosterMember) -> Result<(Identity, SignedToken), DomainError> {
        let identity = Identity::try_from(member)?;
        let token = self.issuer.issue(&identity)?;
        Ok((identity, token))
    }
}

/// Write token records as a pretty-printed JSON array
pub async fn write_token_records(path: &Path, records: &[TokenRecord]) -> Result<(), DomainError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| DomainError::internal(format!("Failed to serialize tokens: {}", e)))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| DomainError::output(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinksConfig;
    use crate::domain::dispatch::MockEmailSender;
    use crate::domain::{DispatchResult, Team};
    use chrono::Duration;
    use mockall::Sequence;

    fn member(email: &str, name: &str, id: &str, team_id: &str) -> RosterMember {
        RosterMember {
            email: Some(email.to_string()),
            name_zh: Some(name.to_string()),
            name_en: Some(format!("{} EN", name)),
            id: Some(id.to_string()),
            team_id: Some(team_id.to_string()),
        }
    }

    fn team(name: &str, members: Vec<RosterMember>) -> Team {
        Team {
            team_name: name.to_string(),
            members,
        }
    }

    fn issuer() -> CredentialIssuer {
        CredentialIssuer::with_secret("batch-secret", Duration::days(7))
    }

    fn orchestrator() -> BatchOrchestrator {
        let renderer = MessageRenderer::new(&LinksConfig::default()).unwrap();
        BatchOrchestrator::new(issuer(), renderer)
    }

    fn delivered() -> DispatchResult {
        DispatchResult::Delivered {
            status: 201,
            message_id: None,
        }
    }

    fn two_member_roster() -> Roster {
        Roster::new(vec![team(
            "Team A",
            vec![
                member("a@hackit.tw", "甲", "u-1", "t-1"),
                member("b@hackit.tw", "乙", "u-2", "t-1"),
            ],
        )])
    }

    #[test]
    fn test_run_mode_from_flags() {
        assert_eq!(RunMode::from_flags(false, None), RunMode::LiveSend);
        assert_eq!(RunMode::from_flags(true, None), RunMode::DryRun);
        assert_eq!(
            RunMode::from_flags(false, Some(PathBuf::from("tokens.json"))),
            RunMode::FileOutput(PathBuf::from("tokens.json"))
        );
        assert!(RunMode::LiveSend.dispatches());
        assert!(!RunMode::DryRun.dispatches());
    }

    #[tokio::test]
    async fn test_live_send_with_filter() {
        let mut sender = MockEmailSender::new();
        sender
            .expect_send()
            .withf(|identity, message| {
                identity.email() == "b@hackit.tw" && message.html.contains(&message.login_url)
            })
            .times(1)
            .returning(|_, _| delivered());

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&two_member_roster(), &RunMode::LiveSend, Some("b@hackit.tw"))
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.to_string(), "Processed 1 users from 1 teams");
    }

    #[tokio::test]
    async fn test_dry_run_never_dispatches() {
        let mut sender = MockEmailSender::new();
        sender.expect_send().never();

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&two_member_roster(), &RunMode::DryRun, Some("a@hackit.tw"))
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.delivered + summary.failed, 0);
        assert_eq!(summary.to_string(), "Processed 1 users from 1 teams");
    }

    #[tokio::test]
    async fn test_dry_run_without_sender() {
        let summary = orchestrator()
            .run(&two_member_roster(), &RunMode::DryRun, None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.teams, 1);
    }

    #[tokio::test]
    async fn test_live_send_without_sender_fails_fast() {
        let result = orchestrator()
            .run(&two_member_roster(), &RunMode::LiveSend, None)
            .await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_empty_roster_is_nothing_to_do() {
        let mut sender = MockEmailSender::new();
        sender.expect_send().never();

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&Roster::default(), &RunMode::LiveSend, None)
            .await
            .unwrap();

        assert!(summary.is_empty());
        assert_eq!(
            summary.to_string(),
            "No tokens generated. Check your filters or data file."
        );
    }

    #[tokio::test]
    async fn test_filter_without_match_is_nothing_to_do() {
        let summary = orchestrator()
            .run(&two_member_roster(), &RunMode::DryRun, Some("nobody@hackit.tw"))
            .await
            .unwrap();

        assert!(summary.is_empty());
        assert_eq!(summary.teams, 0);
        assert_eq!(summary.skipped, 0);
    }

    #[tokio::test]
    async fn test_filter_matches_across_teams() {
        let roster = Roster::new(vec![
            team("Team A", vec![member("judge@hackit.tw", "甲", "u-1", "t-1")]),
            team("Team B", vec![member("other@hackit.tw", "乙", "u-2", "t-2")]),
            team(
                "Team C",
                vec![
                    member("other@hackit.tw", "丙", "u-3", "t-3"),
                    member("judge@hackit.tw", "丁", "u-4", "t-3"),
                ],
            ),
        ]);

        let mut sender = MockEmailSender::new();
        sender
            .expect_send()
            .withf(|identity, _| identity.email() == "judge@hackit.tw")
            .times(2)
            .returning(|_, _| delivered());

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&roster, &RunMode::LiveSend, Some("judge@hackit.tw"))
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.teams, 2);
        assert_eq!(summary.delivered, 2);
    }

    fn three_team_roster() -> Roster {
        Roster::new(vec![
            team(
                "Team A",
                vec![
                    member("a1@hackit.tw", "甲一", "u-1", "t-1"),
                    member("a2@hackit.tw", "甲二", "u-2", "t-1"),
                ],
            ),
            team("Team B", vec![]),
            team(
                "Team C",
                vec![
                    member("c1@hackit.tw", "丙一", "u-3", "t-3"),
                    member("c2@hackit.tw", "丙二", "u-4", "t-3"),
                ],
            ),
        ])
    }

    #[tokio::test]
    async fn test_live_send_follows_roster_order() {
        let mut sender = MockEmailSender::new();
        let mut seq = Sequence::new();

        for email in ["a1@hackit.tw", "a2@hackit.tw", "c1@hackit.tw", "c2@hackit.tw"] {
            sender
                .expect_send()
                .withf(move |identity, _| identity.email() == email)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, _| delivered());
        }

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&three_team_roster(), &RunMode::LiveSend, None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 4);
        assert_eq!(summary.teams, 2);
        assert_eq!(summary.delivered, 4);
    }

    #[tokio::test]
    async fn test_file_output_follows_roster_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        orchestrator()
            .run(&three_team_roster(), &RunMode::FileOutput(path.clone()), None)
            .await
            .unwrap();

        let json = tokio::fs::read_to_string(&path).await.unwrap();
        let records: Vec<TokenRecord> = serde_json::from_str(&json).unwrap();
        let emails: Vec<&str> = records.iter().map(|r| r.email.as_str()).collect();

        assert_eq!(
            emails,
            vec!["a1@hackit.tw", "a2@hackit.tw", "c1@hackit.tw", "c2@hackit.tw"]
        );
    }

    #[tokio::test]
    async fn test_failed_dispatch_does_not_abort_batch() {
        let roster = Roster::new(vec![team(
            "Team A",
            vec![
                member("a@hackit.tw", "甲", "u-1", "t-1"),
                member("b@hackit.tw", "乙", "u-2", "t-1"),
                member("c@hackit.tw", "丙", "u-3", "t-1"),
            ],
        )]);

        let mut sender = MockEmailSender::new();
        sender.expect_send().times(3).returning(|identity, _| {
            if identity.email() == "b@hackit.tw" {
                DispatchResult::Failed {
                    status: Some(400),
                    detail: "bad request".to_string(),
                }
            } else {
                delivered()
            }
        });

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&roster, &RunMode::LiveSend, None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 3);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.failed_recipients,
            vec![(
                "b@hackit.tw".to_string(),
                DispatchResult::Failed {
                    status: Some(400),
                    detail: "bad request".to_string(),
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_invalid_member_is_skipped() {
        let mut broken = member("x@hackit.tw", "壞", "u-9", "t-1");
        broken.team_id = None;

        let roster = Roster::new(vec![team(
            "Team A",
            vec![broken, member("a@hackit.tw", "甲", "u-1", "t-1")],
        )]);

        let summary = orchestrator()
            .run(&roster, &RunMode::DryRun, None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(summary.has_failures());
    }

    #[tokio::test]
    async fn test_file_output_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let mut sender = MockEmailSender::new();
        sender.expect_send().never();

        let summary = orchestrator()
            .with_sender(Arc::new(sender))
            .run(&two_member_roster(), &RunMode::FileOutput(path.clone()), None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.output_path, Some(path.clone()));

        let json = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(json.contains("甲"));

        let records: Vec<TokenRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "a@hackit.tw");
        assert_eq!(records[0].name, "甲");
        assert_eq!(
            records[0].login_url,
            format!("http://localhost:3000/login?auth={}", records[0].token)
        );

        let claims = issuer().verify(records[1].token.as_str()).unwrap();
        assert_eq!(claims.user_id, "u-2");
        assert!(claims.is_judge);
    }

    #[tokio::test]
    async fn test_file_output_write_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("tokens.json");

        let summary = orchestrator()
            .run(&two_member_roster(), &RunMode::FileOutput(path), None)
            .await
            .unwrap();

        assert_eq!(summary.processed, 2);
        assert!(summary.output_path.is_none());
        assert!(summary.output_error.is_some());
        assert!(summary.has_failures());
    }
}
