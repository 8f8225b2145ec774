use std::sync::Arc;

use inkwell_database::Database;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    /// Role names allowed to run moderator-only commands.
    pub moderator_roles: Arc<[String]>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
