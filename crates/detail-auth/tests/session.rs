//! AuthSession against a scripted backend.

use async_trait::async_trait;
use detail_auth::{AuthError, AuthSession, Field, LoginForm, SignupForm, User};
use detail_cache::Cache;
use detail_data::{FetchClient, FetchError, RequestBuilder, Response, Transport};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Response, FetchError>>>,
    seen: Mutex<Vec<RequestBuilder>>,
}

impl ScriptedBackend {
    fn reply(&self, reply: Result<Response, FetchError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn last_request(&self) -> RequestBuilder {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }

    fn request_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedBackend {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        self.seen.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("connection refused".into())))
    }
}

fn session() -> (AuthSession, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend::default());
    let client =
        FetchClient::from_shared(backend.clone()).with_base_url("http://localhost:9090/api");
    (AuthSession::new(client, Cache::in_memory()), backend)
}

fn login_ok() -> Result<Response, FetchError> {
    Ok(Response::json_body(
        200,
        &json!({
            "token": "jwt-1",
            "user": {
                "id": 7,
                "email": "ravi@example.com",
                "firstName": "Ravi",
                "lastName": "Kumar"
            }
        }),
    ))
}

#[tokio::test]
async fn login_stores_session_and_sends_token_afterwards() {
    let (auth, backend) = session();
    backend.reply(login_ok());

    let profile = auth
        .login(&LoginForm::new("ravi@example.com", "secret1").remember(true))
        .await
        .unwrap();
    assert_eq!(profile.display_name(), "Ravi Kumar");
    assert!(auth.is_authenticated());
    assert_eq!(
        auth.remembered_email().unwrap().as_deref(),
        Some("ravi@example.com")
    );

    backend.reply(Ok(Response::json_body(200, &json!({ "valid": true }))));
    assert!(auth.verify().await.unwrap());
    let verify = backend.last_request();
    assert!(verify.url.ends_with("/auth/verify"));
    assert_eq!(verify.header_value("authorization"), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn invalid_form_is_not_sent() {
    let (auth, backend) = session();

    let err = auth.login(&LoginForm::new("nope", "")).await.unwrap_err();
    match err {
        AuthError::Validation(errors) => {
            assert_eq!(errors.get(Field::Email), Some("Please enter a valid email"));
            assert_eq!(errors.get(Field::Password), Some("Password is required"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(backend.request_count(), 0);
}

#[tokio::test]
async fn rejected_login_is_invalid_credentials() {
    let (auth, backend) = session();
    backend.reply(Ok(Response::json_body(
        401,
        &json!({ "message": "Bad email or password" }),
    )));

    let err = auth
        .login(&LoginForm::new("ravi@example.com", "wrong-pass"))
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
    assert!(matches!(err, AuthError::InvalidCredentials(m) if m == "Bad email or password"));
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn unauthorized_anywhere_clears_session() {
    let (auth, backend) = session();
    backend.reply(login_ok());
    auth.login(&LoginForm::new("ravi@example.com", "secret1").remember(true))
        .await
        .unwrap();

    backend.reply(Ok(Response::json_body(401, &json!({ "message": "expired" }))));
    let err = auth.client().get("/products").send().await.unwrap_err();
    assert!(err.is_unauthorized());

    assert_eq!(auth.current_user().unwrap(), User::Anonymous);
    // The remembered email survives.
    assert_eq!(
        auth.remembered_email().unwrap().as_deref(),
        Some("ravi@example.com")
    );
}

#[tokio::test]
async fn logout_clears_even_when_backend_is_down() {
    let (auth, backend) = session();
    backend.reply(login_ok());
    auth.login(&LoginForm::new("ravi@example.com", "secret1"))
        .await
        .unwrap();

    // No reply scripted: the logout call fails with a network error.
    auth.logout().await.unwrap();
    assert!(!auth.is_authenticated());
    assert!(backend.last_request().url.ends_with("/auth/logout"));
}

#[tokio::test]
async fn refresh_replaces_token() {
    let (auth, backend) = session();
    assert!(matches!(auth.refresh().await, Err(AuthError::NotSignedIn)));

    backend.reply(login_ok());
    auth.login(&LoginForm::new("ravi@example.com", "secret1"))
        .await
        .unwrap();

    backend.reply(Ok(Response::json_body(200, &json!({ "token": "jwt-2" }))));
    auth.refresh().await.unwrap();

    backend.reply(Ok(Response::json_body(200, &json!({}))));
    assert!(auth.verify().await.unwrap());
    assert_eq!(
        backend.last_request().header_value("Authorization"),
        Some("Bearer jwt-2")
    );
}

#[tokio::test]
async fn register_without_token_leaves_guest() {
    let (auth, backend) = session();
    backend.reply(Ok(Response::json_body(
        201,
        &json!({ "message": "Account created" }),
    )));

    let form = SignupForm {
        first_name: "Ravi".into(),
        last_name: "Kumar".into(),
        email: "ravi@example.com".into(),
        password: "Shine#2024".into(),
        confirm_password: "Shine#2024".into(),
    };
    assert_eq!(form.password_strength().label(), "Strong");
    assert_eq!(auth.register(&form).await.unwrap(), None);
    assert!(!auth.is_authenticated());

    let body: serde_json::Value =
        serde_json::from_slice(backend.last_request().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["lastName"], "Kumar");
}
