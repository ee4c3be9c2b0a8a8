use chrono::Utc;
use codegate_core::{Account, Session, TokenIssuer, TokenIssuerError, TokenPair};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    pub email: String,
    pub role: String,
    pub token_type: TokenType,
    pub iat: usize,
    pub exp: usize,
}

/// Signs HS256 access and refresh tokens for confirmed accounts.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    fn sign(
        &self,
        account: &Account,
        token_type: TokenType,
        ttl_seconds: i64,
    ) -> Result<String, TokenIssuerError> {
        let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or(
            TokenIssuerError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenIssuerError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp.try_into().map_err(|_| {
            TokenIssuerError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;
        let iat: usize = now.timestamp().try_into().map_err(|_| {
            TokenIssuerError::UnexpectedError("Failed to cast i64 to usize".to_string())
        })?;

        let claims = Claims {
            sub: account.id.to_string(),
            email: account.email.as_ref().expose_secret().clone(),
            role: account.role.to_string(),
            token_type,
            iat,
            exp,
        };

        encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenIssuerError::Signing(e.to_string()))
    }

    fn read_claims(&self, token: &str) -> Result<Claims, TokenIssuerError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| TokenIssuerError::InvalidToken(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    #[tracing::instrument(name = "Issuing session tokens", skip_all)]
    fn issue(&self, account: &Account) -> Result<TokenPair, TokenIssuerError> {
        Ok(TokenPair {
            access_token: self.sign(account, TokenType::Access, self.config.access_ttl_seconds)?,
            refresh_token: self.sign(
                account,
                TokenType::Refresh,
                self.config.refresh_ttl_seconds,
            )?,
        })
    }

    fn validate_access(&self, token: &str) -> Result<Session, TokenIssuerError> {
        let claims = self.read_claims(token)?;
        if claims.token_type != TokenType::Access {
            return Err(TokenIssuerError::InvalidToken(
                "Refresh token used as access token".to_string(),
            ));
        }

        let account_id = claims
            .sub
            .parse()
            .map_err(|_| TokenIssuerError::InvalidToken("Malformed subject".to_string()))?;
        let role = claims
            .role
            .parse()
            .map_err(|_| TokenIssuerError::InvalidToken("Unknown role".to_string()))?;

        Ok(Session { account_id, role })
    }
}
