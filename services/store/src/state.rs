use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCartRepository, DbInteractionRepository, DbProductRepository, DbUserRepository,
    DbViewRepository,
};
use crate::infra::payment::HttpPaymentClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub jwt_secret: String,
    pub payment_session_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn cart_repo(&self) -> DbCartRepository {
        DbCartRepository {
            db: self.db.clone(),
        }
    }

    pub fn interaction_repo(&self) -> DbInteractionRepository {
        DbInteractionRepository {
            db: self.db.clone(),
        }
    }

    pub fn view_repo(&self) -> DbViewRepository {
        DbViewRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_port(&self) -> HttpPaymentClient {
        HttpPaymentClient {
            http: self.http.clone(),
            session_url: self.payment_session_url.clone(),
        }
    }
}
