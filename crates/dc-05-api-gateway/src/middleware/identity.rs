//! Identity Context Provider.
//!
//! Resolves `Authorization: Bearer <token>` into a [`Caller`] and stores it
//! in the request extensions. Requests without a resolvable session carry
//! `Caller::Anonymous`; each engine decides whether that is a 401.

use crate::domain::config::{ConfigError, IdentityConfig};
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use shared_types::{current_timestamp, Caller, SessionVerifier, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::debug;

/// Maps an opaque session token to a user.
pub trait SessionResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<UserId>;
}

/// Signed `<userId>.<expiresAt>.<hmac>` tokens.
pub struct HmacSessionResolver {
    verifier: SessionVerifier,
}

impl HmacSessionResolver {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            verifier: SessionVerifier::new(secret),
        }
    }
}

impl SessionResolver for HmacSessionResolver {
    fn resolve(&self, token: &str) -> Option<UserId> {
        match self.verifier.verify(token, current_timestamp()) {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "session token rejected");
                None
            }
        }
    }
}

/// Fixed token table for development and tests.
#[derive(Default)]
pub struct StaticSessionResolver {
    sessions: HashMap<String, UserId>,
}

impl StaticSessionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, token: impl Into<String>, user: UserId) -> Self {
        self.sessions.insert(token.into(), user);
        self
    }
}

impl SessionResolver for StaticSessionResolver {
    fn resolve(&self, token: &str) -> Option<UserId> {
        self.sessions.get(token).cloned()
    }
}

/// Tries each resolver in order.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn SessionResolver>>,
}

impl ResolverChain {
    /// Static sessions first, then signed tokens.
    pub fn from_config(config: &IdentityConfig) -> Result<Self, ConfigError> {
        let mut resolvers: Vec<Box<dyn SessionResolver>> = Vec::new();

        if !config.static_sessions.is_empty() {
            let mut table = StaticSessionResolver::new();
            for (token, user) in &config.static_sessions {
                let user = UserId::parse(user)
                    .map_err(|e| ConfigError::InvalidSession(format!("user {user:?}: {e}")))?;
                table = table.with_session(token.clone(), user);
            }
            resolvers.push(Box::new(table));
        }

        if let Some(secret) = &config.session_secret {
            resolvers.push(Box::new(HmacSessionResolver::new(secret.as_bytes())));
        }

        if resolvers.is_empty() {
            return Err(ConfigError::NoSessionResolver);
        }
        Ok(Self { resolvers })
    }
}

impl SessionResolver for ResolverChain {
    fn resolve(&self, token: &str) -> Option<UserId> {
        self.resolvers.iter().find_map(|r| r.resolve(token))
    }
}

/// Reads the bearer token, if any.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves the caller for one request.
pub fn resolve_caller(resolver: &dyn SessionResolver, req: &Request<Body>) -> Caller {
    bearer_token(req)
        .and_then(|token| resolver.resolve(token))
        .map_or(Caller::Anonymous, Caller::Authenticated)
}

/// Identity layer
#[derive(Clone)]
pub struct IdentityLayer {
    resolver: Arc<dyn SessionResolver>,
}

impl IdentityLayer {
    pub fn new(resolver: Arc<dyn SessionResolver>) -> Self {
        Self { resolver }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            resolver: Arc::clone(&self.resolver),
        }
    }
}

/// Identity service
#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    resolver: Arc<dyn SessionResolver>,
}

impl<S> Service<Request<Body>> for IdentityService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let caller = resolve_caller(self.resolver.as_ref(), &req);
        if let Some(user) = caller.user_id() {
            debug!(user = %user, "session resolved");
        }
        req.extensions_mut().insert(caller);

        // Call the clone that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::security::sign_session_token;

    fn user(raw: &str) -> UserId {
        UserId::parse(raw).unwrap()
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/interactions/like");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_parsing() {
        assert_eq!(bearer_token(&request(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("bearer  abc "))), Some("abc"));
        assert_eq!(bearer_token(&request(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&request(Some("Bearer "))), None);
        assert_eq!(bearer_token(&request(None)), None);
    }

    #[test]
    fn test_static_resolver() {
        let resolver = StaticSessionResolver::new().with_session("dev-a", user("alice"));
        assert_eq!(
            resolve_caller(&resolver, &request(Some("Bearer dev-a"))),
            Caller::Authenticated(user("alice"))
        );
        assert_eq!(
            resolve_caller(&resolver, &request(Some("Bearer dev-b"))),
            Caller::Anonymous
        );
    }

    #[test]
    fn test_hmac_resolver() {
        let resolver = HmacSessionResolver::new(b"secret".to_vec());
        let expires = current_timestamp() + 600;
        let token = sign_session_token(b"secret", &user("bob"), expires);
        assert_eq!(resolver.resolve(&token), Some(user("bob")));

        let forged = sign_session_token(b"other", &user("bob"), expires);
        assert_eq!(resolver.resolve(&forged), None);

        let expired = sign_session_token(b"secret", &user("bob"), 1);
        assert_eq!(resolver.resolve(&expired), None);
    }

    #[test]
    fn test_chain_from_config() {
        let mut config = IdentityConfig {
            session_secret: Some("secret".into()),
            ..Default::default()
        };
        config
            .static_sessions
            .insert("dev-a".into(), "alice".into());
        let chain = ResolverChain::from_config(&config).unwrap();

        assert_eq!(chain.resolve("dev-a"), Some(user("alice")));
        let token = sign_session_token(b"secret", &user("bob"), current_timestamp() + 60);
        assert_eq!(chain.resolve(&token), Some(user("bob")));
        assert_eq!(chain.resolve("nope"), None);

        assert!(matches!(
            ResolverChain::from_config(&IdentityConfig::default()),
            Err(ConfigError::NoSessionResolver)
        ));
    }
}
