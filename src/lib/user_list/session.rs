use futures::{future::LocalBoxFuture, stream::FuturesUnordered, FutureExt, StreamExt};
use log::debug;

use super::{
    controller::{Applied, RemoteCall, Resolution, UserListController},
    error::RemoteCallFailed,
    models::{User, UserId},
    user_store::UserStore,
};

/// Lets several calls be in flight at once while applying their answers one at a time.
///
/// Everything runs on the caller's task. Calls are only polled from
/// [`Session::next_resolution`], and each answer is applied to the controller in the
/// order the store resolved them, against whatever the state is at that moment.
pub struct Session<'s, S> {
    store: &'s S,
    controller: UserListController,
    in_flight: FuturesUnordered<LocalBoxFuture<'s, Resolution>>,
}

impl<'s, S: UserStore> Session<'s, S> {
    pub fn new(store: &'s S, controller: UserListController) -> Self {
        Session {
            store,
            controller,
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn controller(&self) -> &UserListController {
        &self.controller
    }

    pub fn into_controller(self) -> UserListController {
        self.controller
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn begin_create(&mut self) {
        self.controller.begin_create();
    }

    pub fn begin_edit(&mut self, user: &User) {
        self.controller.begin_edit(user);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.controller.set_name(name);
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.controller.set_email(email);
    }

    pub fn load(&mut self) {
        let call = self.controller.load_call();
        self.dispatch(call);
    }

    pub fn submit(&mut self) {
        let call = self.controller.submit_call();
        self.dispatch(call);
    }

    pub fn delete(&mut self, id: UserId) {
        let call = self.controller.delete_call(id);
        self.dispatch(call);
    }

    fn dispatch(&mut self, call: RemoteCall) {
        debug!("Dispatching {:?} ({} already in flight)", call, self.in_flight.len());
        self.in_flight.push(call.send(self.store).boxed_local());
    }

    /// Waits for the next call to resolve and applies it.
    /// Returns `None` once nothing is in flight.
    pub async fn next_resolution(&mut self) -> Option<Result<Applied, RemoteCallFailed>> {
        let resolution = self.in_flight.next().await?;
        Some(self.controller.apply(resolution))
    }

    /// Drains every in-flight call, returning the outcomes in resolution order.
    pub async fn settle(&mut self) -> Vec<Result<Applied, RemoteCallFailed>> {
        let mut outcomes = Vec::with_capacity(self.in_flight.len());
        while let Some(outcome) = self.next_resolution().await {
            outcomes.push(outcome);
        }
        outcomes
    }
}
