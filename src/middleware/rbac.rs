// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// 1. O trait que define o papel exigido por uma rota
pub trait RoleRequirement: Send + Sync + 'static {
    fn required() -> Role;
}

/// 2. O extractor (guardião): a rota só executa se o papel do usuário
/// autenticado bater com o exigido. Divergência vira 403, não um erro duro.
pub struct RequireRole<T>(PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleRequirement,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if user.role != T::required() {
            return Err(AppError::InsufficientPermissions);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct AdminOnly;
impl RoleRequirement for AdminOnly {
    fn required() -> Role {
        Role::Admin
    }
}

pub struct GestionnaireOnly;
impl RoleRequirement for GestionnaireOnly {
    fn required() -> Role {
        Role::Gestionnaire
    }
}
