//! Login page and its server function.
//!
//! The form validates in the browser with the same schema the server
//! applies, so a user sees field errors before any round trip. The server
//! always re-validates before calling the auth service.
//!
//! Without script the form is a plain POST. The server then answers a
//! failed sign-in by redirecting back to the login page with the reply in
//! the query string, and the page renders from it.

use crate::app::LOGIN_PATH;
use crate::components::ui::{Button, Label};
use leptos::ev::SubmitEvent;
use leptos::form::ActionForm;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use listas_core::credentials::{EMAIL_FIELD, PASSWORD_FIELD, SIGN_IN_UNAVAILABLE_MESSAGE};
use listas_core::{
    Credentials, FieldErrors, FormPayload, REPLY_QUERY_PARAM, Submission, SubmissionReply,
    ValidationPolicy,
};

/// Sign-up route linked from the form.
const SIGN_UP_PATH: &str = "/cadastrar";

/// Server function backing the login form.
///
/// Returns the reply to re-render the form with, or redirects to the home
/// page with the auth service's session headers attached.
#[server]
pub async fn submit_login(
    email: Option<String>,
    password: Option<String>,
) -> Result<SubmissionReply, ServerFnError> {
    use crate::error::LoginError;
    use axum::Extension;
    use axum::http::header::ACCEPT;
    use axum::http::{HeaderMap, HeaderName, HeaderValue};
    use leptos_axum::ResponseOptions;
    use listas_platform_access::{LoginOutcome, PasswordAuthenticator, login};
    use std::sync::Arc;

    let Extension(authenticator): Extension<Arc<dyn PasswordAuthenticator>> =
        extract_send().await.map_err(|e| {
            tracing::error!(error = %e, "Authenticator missing from request extensions");
            LoginError::AuthenticatorMissing.into_server_error()
        })?;
    let request_headers: HeaderMap = leptos_axum::extract().await?;

    let payload: FormPayload = [(EMAIL_FIELD, email), (PASSWORD_FIELD, password)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect();

    let reply = match login::sign_in(&payload, authenticator.as_ref()).await {
        LoginOutcome::Authenticated { location, headers } => {
            // Convert everything first so a bad header never leaves a
            // partial session behind.
            let converted = headers
                .iter()
                .map(|(name, value)| {
                    let header_name = HeaderName::from_bytes(name.as_bytes()).ok();
                    let header_value = HeaderValue::from_str(value).ok();
                    header_name.zip(header_value).ok_or_else(|| {
                        tracing::error!(header = %name, "Auth provider returned an unusable header");
                        LoginError::InvalidSessionHeader {
                            name: name.to_string(),
                        }
                        .into_server_error()
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let response = expect_context::<ResponseOptions>();
            for (header_name, header_value) in converted {
                response.append_header(header_name, header_value);
            }
            leptos_axum::redirect(location);
            return Ok(SubmissionReply::default());
        }
        LoginOutcome::Invalid(reply)
        | LoginOutcome::Rejected(reply)
        | LoginOutcome::Unavailable(reply) => reply,
    };

    let plain_form_post = request_headers
        .get(ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));
    if plain_form_post {
        let value = reply.to_query_value().map_err(|e| {
            tracing::error!(error = %e, "Failed to encode login reply");
            LoginError::ReplyEncoding {
                details: e.to_string(),
            }
            .into_server_error()
        })?;
        leptos_axum::redirect(&format!("{LOGIN_PATH}?{REPLY_QUERY_PARAM}={value}"));
    }

    Ok(reply)
}

/// `leptos_axum::extract`, behind an opaque `Send` future so the server
/// function's future can be proven `Send` when it holds a `dyn` extension.
#[cfg(feature = "ssr")]
fn extract_send<T>() -> impl Future<Output = Result<T, ServerFnErrorErr>> + Send
where
    T: axum::extract::FromRequestParts<()> + Send,
    T::Rejection: std::fmt::Debug,
{
    leptos_axum::extract()
}

/// Runs the login schema over the current field values.
fn validate(email: &str, password: &str) -> FieldErrors {
    let payload = FormPayload::from_pairs([(EMAIL_FIELD, email), (PASSWORD_FIELD, password)]);
    match Credentials::parse(&payload) {
        Submission::Success { .. } => FieldErrors::default(),
        Submission::Failure { errors, .. } => errors,
    }
}

/// Login page with email and password.
#[component]
pub fn LoginPage() -> impl IntoView {
    let submit = ServerAction::<SubmitLogin>::new();
    let returned = use_query_map()
        .with_untracked(|query| query.get(REPLY_QUERY_PARAM))
        .and_then(|value| SubmissionReply::from_query_value(&value));

    let initial_email = returned
        .as_ref()
        .and_then(|reply| reply.initial_value.value(EMAIL_FIELD))
        .unwrap_or_default()
        .to_string();
    let email = RwSignal::new(initial_email.clone());
    let password = RwSignal::new(String::new());
    let policy = RwSignal::new(ValidationPolicy::default());
    let errors = RwSignal::new(FieldErrors::default());
    let form_errors = RwSignal::new(Vec::<String>::new());

    if let Some(reply) = returned {
        policy.update(ValidationPolicy::on_submit);
        errors.set(reply.field_errors);
        form_errors.set(reply.form_errors);
    }

    let revalidate = move || {
        errors.set(validate(&email.get_untracked(), &password.get_untracked()));
    };

    // The server's answer replaces whatever the browser computed.
    Effect::new(move || match submit.value().get() {
        Some(Ok(reply)) => {
            policy.update(ValidationPolicy::on_submit);
            errors.set(reply.field_errors);
            form_errors.set(reply.form_errors);
        }
        Some(Err(_)) => {
            form_errors.set(vec![SIGN_IN_UNAVAILABLE_MESSAGE.to_string()]);
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        policy.update(ValidationPolicy::on_submit);
        form_errors.set(Vec::new());
        revalidate();
        if errors.with_untracked(|e| !e.is_empty()) {
            ev.prevent_default();
        }
    };

    let field_error = move |field: &'static str| {
        move || {
            if policy.with(|p| p.is_validated(field)) {
                errors.with(|e| e.messages(field).join(" "))
            } else {
                String::new()
            }
        }
    };

    view! {
        <div class="login-page">
            <div class="login-panel">
                <div class="login-card">
                    <div class="login-header">
                        <h1 class="login-title">"Faça o seu login."</h1>
                        <p class="login-subtitle">"Entre com seu e-mail e senha abaixo"</p>
                    </div>

                    <ActionForm action=submit on:submit:capture=on_submit attr:class="login-form">
                        <Label for_id=EMAIL_FIELD>"E-mail"</Label>
                        <input
                            class="input"
                            type="email"
                            id=EMAIL_FIELD
                            name=EMAIL_FIELD
                            placeholder="example@example.com"
                            value=initial_email
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                if policy.with_untracked(|p| p.should_revalidate(EMAIL_FIELD)) {
                                    revalidate();
                                }
                            }
                            on:blur=move |_| {
                                policy.update(|p| p.on_blur(EMAIL_FIELD));
                                revalidate();
                            }
                        />
                        <p class="field-error">{field_error(EMAIL_FIELD)}</p>

                        <Label for_id=PASSWORD_FIELD>"Senha"</Label>
                        <input
                            class="input"
                            type="password"
                            id=PASSWORD_FIELD
                            name=PASSWORD_FIELD
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                if policy.with_untracked(|p| p.should_revalidate(PASSWORD_FIELD)) {
                                    revalidate();
                                }
                            }
                            on:blur=move |_| {
                                policy.update(|p| p.on_blur(PASSWORD_FIELD));
                                revalidate();
                            }
                        />
                        <p class="field-error">{field_error(PASSWORD_FIELD)}</p>

                        <p class="form-error">{move || form_errors.get().join(" ")}</p>

                        <Button button_type="submit" class="button-submit">
                            "Entrar"
                        </Button>
                        <a class="signup-link" href=SIGN_UP_PATH>
                            "Ainda não possui uma conta? Cadastre-se!"
                        </a>
                    </ActionForm>
                </div>
            </div>

            <img class="login-illustration" src="/login.svg" alt="create img"/>
        </div>
    }
}


#[cfg(all(test, feature = "ssr"))]
mod server_tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::header::{ACCEPT, CONTENT_TYPE, LOCATION, REFERER, SET_COOKIE};
    use axum::http::{Request, Response, StatusCode};
    use axum::routing::post;
    use axum::{Extension, Router};
    use leptos::server_fn::ServerFn;
    use leptos_router::components::Router as PageRouter;
    use leptos_router::location::RequestUrl;
    use listas_core::Credentials;
    use listas_core::credentials::CREDENTIALS_REJECTED_MESSAGE;
    use listas_platform_access::{AuthenticationError, PasswordAuthenticator, SessionHeaders};
    use std::sync::Arc;
    use tower::ServiceExt;

    const HTML: &str = "text/html,application/xhtml+xml";
    const JSON: &str = "application/json";

    struct FixedAuthenticator(Result<SessionHeaders, AuthenticationError>);

    #[async_trait]
    impl PasswordAuthenticator for FixedAuthenticator {
        async fn sign_in_with_password(
            &self,
            _credentials: &Credentials,
        ) -> listas_core::Result<SessionHeaders, AuthenticationError> {
            self.0.clone().map_err(Into::into)
        }
    }

    fn app(answer: Option<Result<SessionHeaders, AuthenticationError>>) -> Router {
        let router = Router::new().route("/api/{*fn_name}", post(leptos_axum::handle_server_fns));
        match answer {
            Some(answer) => {
                let authenticator: Arc<dyn PasswordAuthenticator> =
                    Arc::new(FixedAuthenticator(answer));
                router.layer(Extension(authenticator))
            }
            None => router,
        }
    }

    async fn post_login(router: Router, accept: &str, body: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(SubmitLogin::PATH)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, accept)
            .header(REFERER, LOGIN_PATH)
            .body(Body::from(body.to_string()))
            .expect("request");
        router.oneshot(request).await.expect("response")
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf-8")
    }

    fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }

    const VALID_FORM: &str = "email=a%40b.com&password=longenough1";

    #[tokio::test]
    async fn sign_in_redirects_home_with_every_session_header() {
        let headers = SessionHeaders::new()
            .with("Set-Cookie", "session=xyz")
            .with("Set-Cookie", "sb-abc-auth-token=base64-e30; Path=/");
        let response = post_login(app(Some(Ok(headers))), HTML, VALID_FORM).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/home");
        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();
        assert_eq!(
            cookies,
            vec!["session=xyz", "sb-abc-auth-token=base64-e30; Path=/"]
        );
    }

    #[tokio::test]
    async fn unusable_session_header_fails_with_safe_message() {
        let headers = SessionHeaders::new()
            .with("Set-Cookie", "session=xyz")
            .with("Set-Cookie", "broken\nvalue");
        let response = post_login(app(Some(Ok(headers))), JSON, VALID_FORM).await;

        assert!(response.status().is_server_error());
        assert!(response.headers().get(SET_COOKIE).is_none());
        let body = body_text(response).await;
        assert!(body.contains("Sign-in could not be completed"));
        assert!(!body.contains("broken"));
    }

    #[tokio::test]
    async fn missing_authenticator_fails_with_safe_message() {
        let response = post_login(app(None), JSON, VALID_FORM).await;

        assert!(response.status().is_server_error());
        assert!(body_text(response).await.contains("Sign-in is not available"));
    }

    #[tokio::test]
    async fn scripted_rejection_answers_with_reply() {
        let answer = Err(AuthenticationError::InvalidCredentials);
        let response = post_login(app(Some(answer)), JSON, VALID_FORM).await;

        assert_eq!(response.status(), StatusCode::OK);
        let reply: SubmissionReply =
            serde_json::from_str(&body_text(response).await).expect("reply json");
        assert_eq!(reply.messages(EMAIL_FIELD), [CREDENTIALS_REJECTED_MESSAGE]);
        assert_eq!(reply.messages(PASSWORD_FIELD), [CREDENTIALS_REJECTED_MESSAGE]);
    }

    #[tokio::test]
    async fn plain_rejection_returns_to_login_with_reply() {
        let answer = Err(AuthenticationError::InvalidCredentials);
        let response = post_login(app(Some(answer)), HTML, VALID_FORM).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        let prefix = format!("{LOGIN_PATH}?{REPLY_QUERY_PARAM}=");
        let value = location(&response)
            .strip_prefix(prefix.as_str())
            .expect("reply in query");
        let reply = SubmissionReply::from_query_value(value).expect("decodable reply");
        assert_eq!(reply.messages(EMAIL_FIELD), [CREDENTIALS_REJECTED_MESSAGE]);
        assert_eq!(reply.initial_value.value(EMAIL_FIELD), Some("a@b.com"));
        assert_eq!(reply.initial_value.value(PASSWORD_FIELD), None);
    }

    #[tokio::test]
    async fn plain_invalid_form_never_reaches_authenticator() {
        let answer = Ok(SessionHeaders::new().with("Set-Cookie", "session=xyz"));
        let response = post_login(app(Some(answer)), HTML, "email=a%40b&password=short").await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(location(&response).starts_with(LOGIN_PATH));
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    fn render_login(url: &str) -> String {
        Owner::new().with(|| {
            provide_context(RequestUrl::new(url));
            view! {
                <PageRouter>
                    <LoginPage/>
                </PageRouter>
            }
            .to_html()
        })
    }

    #[test]
    fn page_renders_reply_from_query() {
        let mut errors = FieldErrors::new();
        errors.push(EMAIL_FIELD, CREDENTIALS_REJECTED_MESSAGE);
        errors.push(PASSWORD_FIELD, CREDENTIALS_REJECTED_MESSAGE);
        let reply = SubmissionReply {
            status: listas_core::ReplyStatus::Error,
            initial_value: FormPayload::from_pairs([(EMAIL_FIELD, "a@b.com")]),
            field_errors: errors,
            form_errors: Vec::new(),
        };
        let value = reply.to_query_value().expect("encode");

        let html = render_login(&format!("{LOGIN_PATH}?{REPLY_QUERY_PARAM}={value}"));

        assert_eq!(html.matches(CREDENTIALS_REJECTED_MESSAGE).count(), 2);
        assert!(html.contains(r#"value="a@b.com""#));
    }

    #[test]
    fn page_without_reply_shows_no_errors() {
        let html = render_login(LOGIN_PATH);

        assert!(!html.contains(CREDENTIALS_REJECTED_MESSAGE));
        assert!(!html.contains(SIGN_IN_UNAVAILABLE_MESSAGE));
    }
}
