//! Reconciliation of the local user list with the remote store.
//!
//! Every operation comes in two halves: a call is prepared from the current state, sent
//! to the store, and its [`Resolution`] is applied back. Applying is all-or-nothing: a
//! failed call leaves both the list and the draft exactly as they were.
//!
//! Create and Update apply the field values that were typed into the draft, not anything
//! the store might have normalised. The two only meet again on the next load.
use log::{debug, info, warn};

use super::{
    error::RemoteCallFailed,
    models::{EditDraft, User, UserFields, UserId},
    user_store::UserStore,
};

/// One request to the store, with the draft fields captured when it was prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List,
    Create { fields: UserFields },
    Update { id: UserId, fields: UserFields },
    Delete { id: UserId },
}

/// A call together with how the store answered it.
#[derive(Debug)]
pub enum Resolution {
    Listed(Result<Vec<User>, RemoteCallFailed>),
    Created {
        fields: UserFields,
        outcome: Result<UserId, RemoteCallFailed>,
    },
    Updated {
        id: UserId,
        fields: UserFields,
        outcome: Result<(), RemoteCallFailed>,
    },
    Deleted {
        id: UserId,
        outcome: Result<(), RemoteCallFailed>,
    },
}

/// What a successful resolution did to the local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Loaded { count: usize },
    Created { id: UserId },
    Updated { id: UserId, replaced: bool },
    Deleted { id: UserId, removed: bool },
}

impl RemoteCall {
    pub async fn send<S: UserStore>(self, store: &S) -> Resolution {
        match self {
            RemoteCall::List => Resolution::Listed(store.list_users().await),
            RemoteCall::Create { fields } => {
                let outcome = store.create_user(&fields).await;
                Resolution::Created { fields, outcome }
            }
            RemoteCall::Update { id, fields } => {
                let outcome = store.update_user(&id, &fields).await;
                Resolution::Updated {
                    id,
                    fields,
                    outcome,
                }
            }
            RemoteCall::Delete { id } => {
                let outcome = store.delete_user(&id).await;
                Resolution::Deleted { id, outcome }
            }
        }
    }
}

/// Owns the cached user list and the form draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListController {
    users: Vec<User>,
    draft: EditDraft,
}

impl UserListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn begin_create(&mut self) {
        self.draft = EditDraft::default();
    }

    /// Copies the displayed values of `user` into the draft; the store is not consulted.
    pub fn begin_edit(&mut self, user: &User) {
        debug!("Editing user {}", user.id);
        self.draft = EditDraft::for_user(user);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    /// True when the draft edits a user that is no longer in the list,
    /// e.g. because it was deleted while the edit was open.
    pub fn draft_target_missing(&self) -> bool {
        self.draft
            .target_id
            .as_ref()
            .is_some_and(|id| self.find_user(id).is_none())
    }

    pub fn load_call(&self) -> RemoteCall {
        RemoteCall::List
    }

    pub fn create_call(&self) -> RemoteCall {
        RemoteCall::Create {
            fields: self.draft.fields(),
        }
    }

    /// `None` while the draft is in create mode.
    pub fn update_call(&self) -> Option<RemoteCall> {
        self.draft.target_id.clone().map(|id| RemoteCall::Update {
            id,
            fields: self.draft.fields(),
        })
    }

    /// Create or Update, depending only on whether the draft has a target.
    pub fn submit_call(&self) -> RemoteCall {
        self.update_call().unwrap_or_else(|| self.create_call())
    }

    pub fn delete_call(&self, id: UserId) -> RemoteCall {
        RemoteCall::Delete { id }
    }

    /// Applies a resolved call to whatever the state is right now.
    pub fn apply(&mut self, resolution: Resolution) -> Result<Applied, RemoteCallFailed> {
        match resolution {
            Resolution::Listed(outcome) => {
                let users = outcome.inspect_err(|err| warn!("Load failed: {}", err))?;
                info!("Loaded {} users", users.len());
                self.users = users;
                Ok(Applied::Loaded {
                    count: self.users.len(),
                })
            }
            Resolution::Created { fields, outcome } => {
                let id = outcome.inspect_err(|err| warn!("Create failed: {}", err))?;
                debug!("Appending user {}", id);
                self.users.push(User {
                    id: id.clone(),
                    name: fields.name,
                    email: fields.email,
                });
                self.begin_create();
                Ok(Applied::Created { id })
            }
            Resolution::Updated {
                id,
                fields,
                outcome,
            } => {
                outcome.inspect_err(|err| warn!("Update of {} failed: {}", id, err))?;
                // ids are not unique locally, every entry carrying this one is rewritten
                let mut replaced = false;
                for user in self.users.iter_mut().filter(|user| user.id == id) {
                    user.name.clone_from(&fields.name);
                    user.email.clone_from(&fields.email);
                    replaced = true;
                }
                debug!("Updated user {} (present locally: {})", id, replaced);
                self.begin_create();
                Ok(Applied::Updated { id, replaced })
            }
            Resolution::Deleted { id, outcome } => {
                outcome.inspect_err(|err| warn!("Delete of {} failed: {}", id, err))?;
                let before = self.users.len();
                self.users.retain(|user| user.id != id);
                let removed = self.users.len() != before;
                debug!("Deleted user {} (present locally: {})", id, removed);
                Ok(Applied::Deleted { id, removed })
            }
        }
    }

    /// Replaces the list with the store's snapshot.
    pub async fn load<S: UserStore>(&mut self, store: &S) -> Result<Applied, RemoteCallFailed> {
        let resolution = self.load_call().send(store).await;
        self.apply(resolution)
    }

    pub async fn submit<S: UserStore>(&mut self, store: &S) -> Result<Applied, RemoteCallFailed> {
        let resolution = self.submit_call().send(store).await;
        self.apply(resolution)
    }

    /// Creates a user from the draft fields, whatever mode the draft is in.
    pub async fn create<S: UserStore>(&mut self, store: &S) -> Result<Applied, RemoteCallFailed> {
        let resolution = self.create_call().send(store).await;
        self.apply(resolution)
    }

    /// Updates the draft's target. Returns `None` without calling the store in create mode.
    pub async fn update<S: UserStore>(
        &mut self,
        store: &S,
    ) -> Option<Result<Applied, RemoteCallFailed>> {
        let call = self.update_call()?;
        let resolution = call.send(store).await;
        Some(self.apply(resolution))
    }

    pub async fn delete<S: UserStore>(
        &mut self,
        store: &S,
        id: UserId,
    ) -> Result<Applied, RemoteCallFailed> {
        let resolution = self.delete_call(id).send(store).await;
        self.apply(resolution)
    }
}
