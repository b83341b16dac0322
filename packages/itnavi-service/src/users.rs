use serde::Deserialize;

use crate::{Error, ItnaviService, Result};
use itnavi_storage::{history, models::NewUser, users};

#[derive(Clone, Debug, Deserialize)]
pub struct RegisterUserRequest {
	pub user_name: String,
	pub company_name: String,
	pub email: String,
	pub search_id: i32,
}

impl ItnaviService {
	/// Registers a contact and back-fills the session it came from.
	pub async fn register_user(&self, request: RegisterUserRequest) -> Result<i32> {
		if request.user_name.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "user_name must not be empty.".to_string() });
		}
		if request.email.trim().is_empty() || !request.email.contains('@') {
			return Err(Error::InvalidRequest { message: "email is not valid.".to_string() });
		}

		// Fail before the insert if the session does not exist.
		history::get_search(&self.db, request.search_id).await?;

		let user = NewUser {
			user_name: request.user_name.trim().to_string(),
			company_name: request.company_name.trim().to_string(),
			email: request.email.trim().to_string(),
		};
		let user_id = users::insert_user(&self.db, &user).await?;

		history::set_search_user(&self.db, request.search_id, user_id).await?;

		Ok(user_id)
	}

	/// Records an agent-consultation request and notifies the operators.
	/// Notification delivery is best-effort; a failed webhook never fails
	/// the request.
	pub async fn request_agent_support(&self, user_id: i32, search_id: i32) -> Result<i32> {
		let user = users::get_user(&self.db, user_id).await?;

		history::get_search(&self.db, search_id).await?;

		let request_id = users::insert_agent_request(&self.db, user_id, search_id).await?;

		if self.cfg.providers.notify.enabled {
			let notifier = self.providers.notifier.clone();
			let cfg = self.cfg.providers.notify.clone();
			let body = format!(
				"エージェント相談希望を受け付けました。\n\
				依頼ID: {request_id}\n\
				ユーザー名: {user_name}\n\
				会社名: {company_name}\n\
				メールアドレス: {email}\n\
				検索ID: {search_id}",
				user_name = user.user_name,
				company_name = user.company_name,
				email = user.email,
			);

			tokio::spawn(async move {
				if let Err(err) = notifier.notify(&cfg, &body).await {
					tracing::warn!(error = %err, "Agent-request notification failed.");
				}
			});
		}

		Ok(request_id)
	}
}
