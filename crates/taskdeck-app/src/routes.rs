//! Client-side routes and the session guard.

use taskdeck_client::Session;

/// The route table. `/` folds into [`Route::Dashboard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    TaskNew,
    TaskDetail(i64),
    TaskEdit(i64),
}

impl Route {
    /// Parse a path into a route. Unknown paths are `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            [""] => Some(Route::Dashboard),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["dashboard"] => Some(Route::Dashboard),
            ["tasks", "new"] => Some(Route::TaskNew),
            ["tasks", id] => id.parse().ok().map(Route::TaskDetail),
            ["tasks", id, "edit"] => id.parse().ok().map(Route::TaskEdit),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::TaskNew => "/tasks/new".to_string(),
            Route::TaskDetail(id) => format!("/tasks/{id}"),
            Route::TaskEdit(id) => format!("/tasks/{id}/edit"),
        }
    }

    /// Everything but login and register requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Apply the guard: a protected route without a stored token bounces to
    /// login.
    pub async fn resolve(self, session: &Session) -> Route {
        if self.is_protected() && !session.is_logged_in().await {
            Route::Login
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_route_table() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/register"), Some(Route::Register));
        assert_eq!(Route::parse("/dashboard"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/tasks/new"), Some(Route::TaskNew));
        assert_eq!(Route::parse("/tasks/7"), Some(Route::TaskDetail(7)));
        assert_eq!(Route::parse("/tasks/7/edit"), Some(Route::TaskEdit(7)));
        assert_eq!(Route::parse("/tasks/abc"), None);
        assert_eq!(Route::parse("/nope"), None);
    }

    #[test]
    fn routes_render_back_to_their_paths() {
        for route in [
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::TaskNew,
            Route::TaskDetail(7),
            Route::TaskEdit(7),
        ] {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[tokio::test]
    async fn guard_denies_protected_routes_exactly_when_logged_out() {
        let session = Session::in_memory();

        assert_eq!(Route::Dashboard.resolve(&session).await, Route::Login);
        assert_eq!(Route::TaskNew.resolve(&session).await, Route::Login);
        assert_eq!(Route::TaskEdit(7).resolve(&session).await, Route::Login);
        assert_eq!(Route::Register.resolve(&session).await, Route::Register);

        session.set_token("tok").await.unwrap();
        assert_eq!(Route::Dashboard.resolve(&session).await, Route::Dashboard);
        assert_eq!(
            Route::TaskDetail(7).resolve(&session).await,
            Route::TaskDetail(7)
        );

        session.clear().await.unwrap();
        assert_eq!(Route::Dashboard.resolve(&session).await, Route::Login);
    }
}
