use crate::{
	Result,
	db::Db,
	models::{NewUser, User},
};

pub async fn insert_user(db: &Db, user: &NewUser) -> Result<i32> {
	let user_id: i32 = sqlx::query_scalar(
		"\
INSERT INTO m_user (user_name, company_name, email)
VALUES ($1, $2, $3)
RETURNING user_id",
	)
	.bind(user.user_name.as_str())
	.bind(user.company_name.as_str())
	.bind(user.email.as_str())
	.fetch_one(&db.pool)
	.await?;

	Ok(user_id)
}

pub async fn get_user(db: &Db, user_id: i32) -> Result<User> {
	sqlx::query_as::<_, User>(
		"\
SELECT user_id, user_name, company_name, email, created_at
FROM m_user
WHERE user_id = $1",
	)
	.bind(user_id)
	.fetch_optional(&db.pool)
	.await?
	.ok_or_else(|| crate::Error::NotFound(format!("m_user {user_id}")))
}

pub async fn insert_agent_request(db: &Db, user_id: i32, search_id: i32) -> Result<i32> {
	let request_id: i32 = sqlx::query_scalar(
		"\
INSERT INTO t_agent_request (user_id, search_id)
VALUES ($1, $2)
RETURNING request_id",
	)
	.bind(user_id)
	.bind(search_id)
	.fetch_one(&db.pool)
	.await?;

	Ok(request_id)
}
