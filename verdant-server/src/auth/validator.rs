//! HS256 session token verification

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use verdant_core::{Authenticated, Profile};

use super::{AuthConfig, AuthError};

/// Claims carried by a session token
///
/// Besides the subject these are exactly the profile values the
/// entitlements compiler consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_role: Option<String>,
}

impl SessionClaims {
    pub fn new(sub: impl Into<String>, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            exp,
            iss: None,
            plan: None,
            mode: None,
            app_role: None,
        }
    }

    pub fn with_plan(mut self, plan: impl Into<String>, mode: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self.mode = Some(mode.into());
        self
    }

    pub fn with_app_role(mut self, app_role: impl Into<String>) -> Self {
        self.app_role = Some(app_role.into());
        self
    }

    /// Split into the authenticated principal and its profile
    ///
    /// Tokens never carry a facility role; that comes from membership.
    pub fn into_parts(self) -> (Authenticated, Profile) {
        let profile = Profile {
            plan: self.plan,
            mode: self.mode,
            app_role: self.app_role,
            facility_id: None,
            facility_role: None,
        };
        (Authenticated::new(self.sub), profile)
    }
}

/// Verifies (and for tooling, issues) session tokens
pub struct SessionValidator {
    config: AuthConfig,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionValidator {
    pub fn new(config: AuthConfig) -> Result<Self, AuthError> {
        if !config.is_valid() {
            return Err(AuthError::MissingSecret);
        }
        let secret = config.secret.as_bytes();
        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
            config,
        })
    }

    /// Validate a token and return its claims
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
        }

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Sign claims into a token, stamping the configured issuer
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        let mut claims = claims.clone();
        if claims.iss.is_none() {
            claims.iss = self.config.issuer.clone();
        }
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
