use poise::serenity_prelude as serenity;

/// Check whether a role name is one of the allowed moderator role names.
///
/// Matching is exact, the way role names are displayed in the guild.
pub fn is_moderator_role_name(role_name: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|name| name == role_name)
}

/// Resolve whether a guild member holds any role whose name is in `allowed`.
pub async fn has_moderator_role(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    allowed: &[String],
) -> anyhow::Result<bool> {
    if allowed.is_empty() {
        return Ok(false);
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;

    Ok(member.roles.iter().any(|role_id| {
        roles
            .get(role_id)
            .is_some_and(|role| is_moderator_role_name(&role.name, allowed))
    }))
}

#[cfg(test)]
mod tests {
    use super::is_moderator_role_name;

    #[test]
    fn matches_exact_role_names() {
        let allowed = vec!["Tapioca God Mod".to_owned(), "Supreme Pudding Admin".to_owned()];

        assert!(is_moderator_role_name("Tapioca God Mod", &allowed));
        assert!(is_moderator_role_name("Supreme Pudding Admin", &allowed));
        assert!(!is_moderator_role_name("tapioca god mod", &allowed));
        assert!(!is_moderator_role_name("Member", &allowed));
        assert!(!is_moderator_role_name("Member", &[]));
    }
}
