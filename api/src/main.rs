//! Hireloop API Server
//!
//! Multi-tenant applicant tracking: jobs, candidates, interviews and
//! scorecards for organizations, plus public career pages for job seekers.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    HttpOAuthClient, PostgresApplicationRepository, PostgresCandidateRepository,
    PostgresDocumentRepository, PostgresHealth, PostgresIntegrationRepository,
    PostgresInterviewRepository, PostgresInvitationRepository, PostgresJobRepository,
    PostgresOrganizationRepository, PostgresProfileRepository, PostgresScorecardRepository,
    PostgresSubscriptionTierRepository, ResendEmailSender, StripePaymentGateway,
    SupabaseSessionVerifier, SupabaseStorage,
};
use app::{
    AccessService, BillingService, CareerService, DocumentService, IntegrationService,
    SecretBox, SubscriptionService, TeamService, MAX_UPLOAD_BYTES,
};
use config::Config;
use domain::ports::{
    ApplicationRepository, CandidateRepository, DatabaseHealth, DocumentRepository,
    EmailSender, IntegrationRepository, InterviewRepository, InvitationRepository,
    JobRepository, OAuthClient, ObjectStorage, OrganizationRepository, PaymentGateway,
    ProfileRepository, ScorecardRepository, SessionVerifier, SubscriptionTierRepository,
};
use error::AppError;

/// Every port the services are assembled from
#[derive(Clone)]
pub struct Ports {
    pub organizations: Arc<dyn OrganizationRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub candidates: Arc<dyn CandidateRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub interviews: Arc<dyn InterviewRepository>,
    pub scorecards: Arc<dyn ScorecardRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub integrations: Arc<dyn IntegrationRepository>,
    pub tiers: Arc<dyn SubscriptionTierRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub storage: Arc<dyn ObjectStorage>,
    pub email: Arc<dyn EmailSender>,
    pub payments: Arc<dyn PaymentGateway>,
    pub oauth: Arc<dyn OAuthClient>,
    pub database: Arc<dyn DatabaseHealth>,
}

impl Ports {
    /// Production wiring: PostgreSQL repositories and HTTP clients
    fn connect(db: DatabaseConnection, config: &Config) -> Self {
        Self {
            organizations: Arc::new(PostgresOrganizationRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            jobs: Arc::new(PostgresJobRepository::new(db.clone())),
            candidates: Arc::new(PostgresCandidateRepository::new(db.clone())),
            applications: Arc::new(PostgresApplicationRepository::new(db.clone())),
            interviews: Arc::new(PostgresInterviewRepository::new(db.clone())),
            scorecards: Arc::new(PostgresScorecardRepository::new(db.clone())),
            documents: Arc::new(PostgresDocumentRepository::new(db.clone())),
            integrations: Arc::new(PostgresIntegrationRepository::new(db.clone())),
            tiers: Arc::new(PostgresSubscriptionTierRepository::new(db.clone())),
            invitations: Arc::new(PostgresInvitationRepository::new(db.clone())),
            database: Arc::new(PostgresHealth::new(db)),
            sessions: Arc::new(SupabaseSessionVerifier::new(
                config.auth_url.clone(),
                config.auth_anon_key.clone(),
            )),
            storage: Arc::new(SupabaseStorage::new(
                config.storage_url.clone(),
                config.storage_service_key.clone(),
            )),
            email: Arc::new(ResendEmailSender::new(
                config.email_api_url.clone(),
                config.email_api_key.clone(),
                config.email_from.clone(),
            )),
            payments: Arc::new(StripePaymentGateway::new(
                config.payments_api_url.clone(),
                config.payments_secret_key.clone(),
            )),
            oauth: Arc::new(HttpOAuthClient::new()),
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub access: Arc<AccessService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub careers: Arc<CareerService>,
    pub documents: Arc<DocumentService>,
    pub integrations: Arc<IntegrationService>,
    pub team: Arc<TeamService>,
    pub billing: Arc<BillingService>,
    pub organization_repo: Arc<dyn OrganizationRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub candidate_repo: Arc<dyn CandidateRepository>,
    pub application_repo: Arc<dyn ApplicationRepository>,
    pub interview_repo: Arc<dyn InterviewRepository>,
    pub scorecard_repo: Arc<dyn ScorecardRepository>,
    pub document_repo: Arc<dyn DocumentRepository>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub database: Arc<dyn DatabaseHealth>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, ports: Ports) -> Result<Self, AppError> {
        let secrets = SecretBox::new(&config.encryption_key)?;

        let access = Arc::new(AccessService::new(ports.profiles.clone()));
        let subscriptions = Arc::new(SubscriptionService::new(
            ports.profiles.clone(),
            ports.organizations.clone(),
            ports.tiers.clone(),
        ));
        let careers = Arc::new(CareerService::new(
            ports.organizations.clone(),
            ports.jobs.clone(),
            ports.candidates.clone(),
            ports.applications.clone(),
            ports.email.clone(),
        ));
        let documents = Arc::new(DocumentService::new(
            ports.storage.clone(),
            ports.documents.clone(),
            ports.candidates.clone(),
        ));
        let integrations = Arc::new(IntegrationService::new(
            ports.integrations.clone(),
            ports.oauth.clone(),
            secrets,
            config.clone(),
        ));
        let team = Arc::new(TeamService::new(
            ports.profiles.clone(),
            ports.organizations.clone(),
            ports.invitations.clone(),
            ports.email.clone(),
            config.app_base_url.clone(),
        ));
        let billing = Arc::new(BillingService::new(
            ports.organizations.clone(),
            ports.tiers.clone(),
            ports.payments.clone(),
            config.app_base_url.clone(),
            config.payments_webhook_secret.clone(),
        ));

        Ok(Self {
            access,
            subscriptions,
            careers,
            documents,
            integrations,
            team,
            billing,
            organization_repo: ports.organizations,
            job_repo: ports.jobs,
            candidate_repo: ports.candidates,
            application_repo: ports.applications,
            interview_repo: ports.interviews,
            scorecard_repo: ports.scorecards,
            document_repo: ports.documents,
            sessions: ports.sessions,
            database: ports.database,
            config,
        })
    }
}

/// Full route table with middleware
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Public application form: per-IP limit when enabled.
    // PeerIpKeyExtractor needs the socket address from into_make_service_with_connect_info.
    let mut apply_routes = Router::new().route(
        "/api/careers/:slug/jobs/:job_id/apply",
        post(handlers::apply),
    );
    if state.config.rate_limit_enabled {
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_second(2)
                .burst_size(5)
                .finish()
                .context("Failed to build governor config")?,
        );
        apply_routes = apply_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let public_routes = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/subscription-tiers", get(handlers::list_tiers))
        .route("/api/careers/:slug", get(handlers::get_career_page))
        .route(
            "/api/careers/:slug/jobs/:job_id",
            get(handlers::get_career_job),
        )
        // Signature-authenticated
        .route("/api/billing/webhook", post(handlers::webhook))
        .merge(apply_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::me))
        .route("/api/subscription/gate", get(handlers::get_gate))
        // Pipeline
        .route(
            "/api/jobs",
            get(handlers::list_jobs).post(handlers::create_job),
        )
        .route(
            "/api/jobs/:id",
            get(handlers::get_job)
                .patch(handlers::update_job)
                .delete(handlers::delete_job),
        )
        .route(
            "/api/candidates",
            get(handlers::list_candidates).post(handlers::create_candidate),
        )
        .route("/api/candidates/:id", get(handlers::get_candidate))
        .route("/api/applications", get(handlers::list_applications))
        .route(
            "/api/applications/:id/stage",
            patch(handlers::update_stage),
        )
        .route(
            "/api/interviews",
            get(handlers::list_interviews).post(handlers::create_interview),
        )
        .route("/api/interviews/:id", patch(handlers::update_interview))
        .route(
            "/api/scorecard-templates",
            get(handlers::list_templates).post(handlers::create_template),
        )
        .route(
            "/api/scorecard-templates/:id",
            delete(handlers::delete_template),
        )
        .route(
            "/api/scorecards",
            get(handlers::list_scorecards).post(handlers::submit_scorecard),
        )
        // Files
        .route(
            "/api/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        .route("/api/documents", get(handlers::list_documents))
        .route("/api/documents/:id", delete(handlers::delete_document))
        // Organization settings
        .route("/api/careers/settings", put(handlers::update_settings))
        .route(
            "/api/integrations/credentials",
            get(handlers::list_credentials).post(handlers::save_credential),
        )
        .route(
            "/api/integrations/connections",
            get(handlers::list_connections),
        )
        .route(
            "/api/integrations/:provider/connect",
            get(handlers::connect),
        )
        .route(
            "/api/integrations/:provider/callback",
            get(handlers::callback),
        )
        .route(
            "/api/integrations/:provider/connection",
            delete(handlers::disconnect),
        )
        .route("/api/team", get(handlers::list_team))
        .route("/api/team/invite", post(handlers::invite))
        .route("/api/team/:user_id/role", patch(handlers::change_role))
        .route("/api/billing/checkout", post(handlers::checkout))
        .route("/api/billing/verify", post(handlers::verify))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hireloop_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hireloop API...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let ports = Ports::connect(db, &config);
    let state = AppState::new(config.clone(), ports)?;
    let app = build_router(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
