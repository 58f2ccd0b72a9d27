use crate::api::{QrTarget, VotingApi};
use crate::config::Config;
use crate::error::{ClientError, optional};
use crate::models::{
    AdminCurrentPoll, AdminCurrentSession, Advance, ApiErrorBody, CreatedPoll, CreatedSession,
    CumulativeResults, GroupId, GroupResults, Image, ImageId, MfkSubmission, NamedImage, Poll,
    PollId, QrCode, RenameRequest, SessionId, SmashPassBallot, SmashPassResults,
    SmashPassSession, SubmitReceipt, VoteReceipt, VoterCurrentPoll, VoterCurrentSession,
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("party-vote/", env!("CARGO_PKG_VERSION"));

pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Self::with_base_url(&config.base_url, config.request_timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        // Voters are told apart by the backend's session cookie
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        // Without a trailing slash `join` would replace the last path segment
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { client, base })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.client.get(self.url(path)?);
        self.execute(request, path).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.client.post(self.url(path)?);
        self.execute(request, path).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let request = self.client.post(self.url(path)?).json(body);
        self.execute(request, path).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let body = self.send(request, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // Sends the request and returns the raw body of a successful response
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<String, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> {}", path, status);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|payload| payload.error)
                .unwrap_or_else(|_| "Request failed".to_string());
            if status.as_u16() != 404 {
                warn!("Request to {} failed with {}: {}", path, status, message);
            }
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl VotingApi for HttpApi {
    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        self.get("/admin/images").await
    }

    async fn toggle_image(&self, image_id: ImageId) -> Result<Image, ClientError> {
        self.post(&format!("/admin/images/{}/toggle", image_id)).await
    }

    async fn rename_image(&self, image_id: ImageId, new_name: &str) -> Result<(), ClientError> {
        let body = RenameRequest {
            new_name: new_name.to_string(),
        };
        let path = format!("/admin/images/{}/rename", image_id);
        let request = self.client.post(self.url(&path)?).json(&body);
        self.send(request, &path).await?;
        Ok(())
    }

    async fn delete_image(&self, image_id: ImageId) -> Result<(), ClientError> {
        let path = format!("/admin/images/{}/delete", image_id);
        let request = self.client.post(self.url(&path)?);
        self.send(request, &path).await?;
        Ok(())
    }

    async fn slideshow_images(&self) -> Result<Vec<NamedImage>, ClientError> {
        self.get("/slideshow/images").await
    }

    async fn qr_code(&self, target: QrTarget) -> Result<QrCode, ClientError> {
        match target {
            QrTarget::Poll => self.get("/admin/qr").await,
            QrTarget::SmashPass => self.get("/smashpass/qr").await,
        }
    }

    async fn create_poll(&self) -> Result<CreatedPoll, ClientError> {
        self.post("/admin/poll/create").await
    }

    async fn current_poll(&self) -> Result<Option<AdminCurrentPoll>, ClientError> {
        optional(self.get("/admin/poll/current").await)
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, ClientError> {
        self.get("/admin/polls/all").await
    }

    async fn start_poll(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.post(&format!("/admin/poll/{}/start", poll_id)).await
    }

    async fn next_group(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.post(&format!("/admin/poll/{}/next-group", poll_id)).await
    }

    async fn end_poll(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.post(&format!("/admin/poll/{}/end", poll_id)).await
    }

    async fn current_group_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<GroupResults>, ClientError> {
        // A group nobody has voted in yet answers with a JSON `null`
        let path = format!("/admin/poll/{}/results/current", poll_id);
        Ok(optional(self.get::<Option<GroupResults>>(&path).await)?.flatten())
    }

    async fn cumulative_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<CumulativeResults>, ClientError> {
        optional(self.get(&format!("/admin/poll/{}/results/cumulative", poll_id)).await)
    }

    async fn voter_current_poll(&self) -> Result<Option<VoterCurrentPoll>, ClientError> {
        optional(self.get("/poll/current").await)
    }

    async fn submit_ballot(
        &self,
        submission: &MfkSubmission,
    ) -> Result<SubmitReceipt, ClientError> {
        self.post_json("/poll/submit", submission).await
    }

    async fn group_results(&self, group_id: GroupId) -> Result<Option<GroupResults>, ClientError> {
        optional(self.get(&format!("/poll/results/{}", group_id)).await)
    }

    async fn create_session(&self) -> Result<CreatedSession, ClientError> {
        self.post("/smashpass/session/create").await
    }

    async fn current_session(&self) -> Result<Option<AdminCurrentSession>, ClientError> {
        optional(self.get("/smashpass/session/current").await)
    }

    async fn list_sessions(&self) -> Result<Vec<SmashPassSession>, ClientError> {
        self.get("/smashpass/sessions/all").await
    }

    async fn start_session(&self, session_id: SessionId) -> Result<SmashPassSession, ClientError> {
        self.post(&format!("/smashpass/session/{}/start", session_id)).await
    }

    async fn advance_session(&self, session_id: SessionId) -> Result<Advance, ClientError> {
        self.post(&format!("/smashpass/session/{}/next", session_id)).await
    }

    async fn session_results(
        &self,
        session_id: SessionId,
    ) -> Result<SmashPassResults, ClientError> {
        self.get(&format!("/smashpass/session/{}/results", session_id)).await
    }

    async fn voter_current_session(&self) -> Result<Option<VoterCurrentSession>, ClientError> {
        optional(self.get("/smashpass/current").await)
    }

    async fn submit_vote(&self, ballot: &SmashPassBallot) -> Result<VoteReceipt, ClientError> {
        self.post_json("/smashpass/vote", ballot).await
    }
}
