use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post, put},
};
use codegate_adapters::{
    config::AllowedOrigins,
    http::routes::{
        ban_account, change_role, confirm_registration, forgot_password, get_account,
        get_profile, health, login, recover_password, register, resend_confirmation,
        unban_account,
    },
};
use codegate_application::{VerificationCodeManager, VerificationSettings};
use codegate_core::{AccountStore, EmailClient, TokenIssuer, VerificationCodeStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// HTTP service exposing the registration and password recovery flows,
/// plus account administration
pub struct CodegateService {
    router: Router,
}

impl CodegateService {
    /// Create a new CodegateService with the provided stores and clients
    ///
    /// # Arguments
    /// * `account_store` - Store for accounts (must be Clone)
    /// * `code_store` - Expiring store for pending verification codes (must be Clone)
    /// * `email_client` - Client used to deliver codes (must be Clone)
    /// * `token_issuer` - Signs session tokens after confirmation and login
    /// * `verification` - Code TTL and attempt budget
    ///
    /// Each route is given only the state it needs.
    pub fn new<A, S, E, T>(
        account_store: A,
        code_store: S,
        email_client: E,
        token_issuer: T,
        verification: VerificationSettings,
    ) -> Self
    where
        A: AccountStore + Clone + 'static,
        S: VerificationCodeStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let manager = VerificationCodeManager::new(code_store, email_client, verification);

        let router = Router::new()
            .route("/register", post(register::<A, S, E>))
            .with_state((account_store.clone(), manager.clone()))
            .route(
                "/confirm-registration",
                post(confirm_registration::<A, S, E, T>),
            )
            .with_state((account_store.clone(), manager.clone(), token_issuer.clone()))
            .route("/resend-confirmation", post(resend_confirmation::<A, S, E>))
            .with_state((account_store.clone(), manager.clone()))
            .route("/forgot-password", post(forgot_password::<A, S, E>))
            .with_state((account_store.clone(), manager.clone()))
            .route("/recover-password", post(recover_password::<A, S, E>))
            .with_state((account_store.clone(), manager))
            .route("/login", post(login::<A, T>))
            .with_state((account_store.clone(), token_issuer.clone()))
            .route("/profile", get(get_profile::<A, T>))
            .with_state((account_store.clone(), token_issuer.clone()))
            .route("/admin/accounts/{target}", get(get_account::<A, T>))
            .with_state((account_store.clone(), token_issuer.clone()))
            .route("/admin/ban/{target}", put(ban_account::<A, T>))
            .with_state((account_store.clone(), token_issuer.clone()))
            .route("/admin/unban/{target}", put(unban_account::<A, T>))
            .with_state((account_store.clone(), token_issuer.clone()))
            .route("/admin/change-role/{target}", put(change_role::<A, T>))
            .with_state((account_store, token_issuer))
            .route("/health", get(health));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on `listener`
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Codegate service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
