use std::{error::Error, time::Duration};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use log::{debug, info};

use super::{
    controller::UserListController,
    error::ConfigError,
    models::{Args, Config, EditDraft, User},
    user_store::HttpUserStore,
};

pub fn log_all_users(users: &[User]) {
    for user in users.iter() {
        debug!("Holding user {} ({} <{}>)", user.id, user.name, user.email);
    }
}

/// Layers built-in defaults, config.json, `UM_*` variables and the `--base-url` flag.
/// A missing config.json is not an error; the defaults apply.
pub fn get_config(args: &Args) -> Result<Config, Box<dyn Error>> {
    info!(
        "Reading config.json from {}",
        std::path::absolute(&args.config_json_path)?.display()
    );
    let mut config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("UM_"))
        .extract()?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

pub fn build_store(config: &Config) -> Result<HttpUserStore, ConfigError> {
    let store = HttpUserStore::new(
        &config.base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    info!("Using user store at {}", store.base_url());
    Ok(store)
}

pub fn format_user(user: &User) -> String {
    format!("[{}] {} - {}", user.id, user.name, user.email)
}

pub fn format_draft(draft: &EditDraft) -> String {
    let mode = match &draft.target_id {
        Some(id) => format!("Editing user {}", id),
        None => "Creating a new user".to_owned(),
    };
    format!("{}: name={:?} email={:?}", mode, draft.name, draft.email)
}

/* everything the page shows: the list, then the form */
pub fn render_controller(controller: &UserListController) -> String {
    log_all_users(controller.users());
    let mut lines = vec![format!("Users ({}):", controller.users().len())];
    lines.extend(
        controller
            .users()
            .iter()
            .map(|user| format!("  {}", format_user(user))),
    );
    lines.push(format_draft(controller.draft()));
    if controller.draft_target_missing() {
        lines.push("warning: the user being edited is no longer in the list".to_owned());
    }
    lines.join("\n")
}
