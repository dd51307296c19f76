//! Fluent assembly of monitor payloads.
//!
//! [`MonitorConfigBuilder`] collects attributes from wherever a caller has
//! them and produces the flat payload [`validate_monitor`] consumes. It does
//! not judge values. The one thing it checks is scope: once a monitor type is
//! chosen, `build()` refuses attributes that type does not understand.
//!
//! ```
//! use monitor_cell::builder::MonitorConfigBuilder;
//! use monitor_cell::models::MonitorType;
//!
//! let payload = MonitorConfigBuilder::new()
//!     .kind(MonitorType::Port)
//!     .name("ssh")
//!     .hostname("10.0.0.2")
//!     .port(22)
//!     .build()
//!     .unwrap();
//! assert_eq!(payload["type"], "port");
//! ```
//!
//! [`validate_monitor`]: crate::models::validate_monitor

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::models::MonitorType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{} not applicable to {monitor_type} monitors", .fields.join(", "))]
    NotApplicable {
        fields: Vec<String>,
        monitor_type: MonitorType,
    },
}

/// HTTP authentication schemes, as named by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    None,
    Basic,
    Ntlm,
    Mtls,
    OAuth2ClientCredentials,
}

impl AuthMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthMethod::None => "",
            AuthMethod::Basic => "basic",
            AuthMethod::Ntlm => "ntlm",
            AuthMethod::Mtls => "mtls",
            AuthMethod::OAuth2ClientCredentials => "oauth2-cc",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonitorConfigBuilder {
    kind: Option<MonitorType>,
    fields: Map<String, Value>,
}

impl MonitorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    fn set_opt<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    // Core identity and scheduling

    pub fn kind(mut self, kind: MonitorType) -> Self {
        self.kind = Some(kind);
        self.set("type", kind.as_str())
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.set("name", name.into())
    }

    pub fn parent(self, parent: i64) -> Self {
        self.set("parent", parent)
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.set("description", description.into())
    }

    pub fn interval(self, seconds: i64) -> Self {
        self.set("interval", seconds)
    }

    pub fn retry_interval(self, seconds: i64) -> Self {
        self.set("retryInterval", seconds)
    }

    pub fn resend_interval(self, beats: i64) -> Self {
        self.set("resendInterval", beats)
    }

    pub fn max_retries(self, retries: i64) -> Self {
        self.set("maxretries", retries)
    }

    pub fn upside_down(self, enabled: bool) -> Self {
        self.set("upsideDown", enabled)
    }

    pub fn notifications(self, ids: impl IntoIterator<Item = i64>) -> Self {
        let ids: Vec<Value> = ids.into_iter().map(Value::from).collect();
        self.set("notificationIDList", ids)
    }

    pub fn conditions(self, conditions: Vec<Value>) -> Self {
        self.set("conditions", conditions)
    }

    // HTTP family

    pub fn url(self, url: impl Into<String>) -> Self {
        self.set("url", url.into())
    }

    pub fn method(self, method: impl Into<String>) -> Self {
        self.set("method", method.into())
    }

    pub fn body(self, encoding: impl Into<String>, body: impl Into<String>) -> Self {
        self.set("httpBodyEncoding", encoding.into())
            .set("body", body.into())
    }

    pub fn headers(self, headers: &Map<String, Value>) -> Self {
        self.set("headers", Value::Object(headers.clone()).to_string())
    }

    pub fn max_redirects(self, redirects: i64) -> Self {
        self.set("maxredirects", redirects)
    }

    pub fn accepted_status_codes<I, S>(self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<Value> = codes.into_iter().map(|c| Value::String(c.into())).collect();
        self.set("accepted_statuscodes", codes)
    }

    pub fn expiry_notification(self, enabled: bool) -> Self {
        self.set("expiryNotification", enabled)
    }

    pub fn ignore_tls(self, ignore: bool) -> Self {
        self.set("ignoreTls", ignore)
    }

    pub fn proxy(self, proxy_id: i64) -> Self {
        self.set("proxyId", proxy_id)
    }

    pub fn timeout(self, seconds: i64) -> Self {
        self.set("timeout", seconds)
    }

    pub fn cache_bust(self, enabled: bool) -> Self {
        self.set("cacheBust", enabled)
    }

    pub fn auth_method(self, method: AuthMethod) -> Self {
        self.set("authMethod", method.as_str())
    }

    pub fn basic_auth(self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.set("basic_auth_user", user.into())
            .set("basic_auth_pass", pass.into())
    }

    pub fn ntlm_domain(self, domain: impl Into<String>, workstation: Option<&str>) -> Self {
        self.set("authDomain", domain.into())
            .set_opt("authWorkstation", workstation)
    }

    pub fn client_certificate(
        self,
        cert: impl Into<String>,
        key: impl Into<String>,
        ca: Option<&str>,
    ) -> Self {
        self.set("tlsCert", cert.into())
            .set("tlsKey", key.into())
            .set_opt("tlsCa", ca)
    }

    pub fn oauth_client_credentials(
        self,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.set("oauth_token_url", token_url.into())
            .set("oauth_client_id", client_id.into())
            .set("oauth_client_secret", client_secret.into())
    }

    pub fn oauth_scopes(self, scopes: impl Into<String>) -> Self {
        self.set("oauth_scopes", scopes.into())
    }

    pub fn oauth_auth_method(self, method: impl Into<String>) -> Self {
        self.set("oauth_auth_method", method.into())
    }

    // Keyword and JSON query

    pub fn keyword(self, keyword: impl Into<String>, invert: bool) -> Self {
        self.set("keyword", keyword.into())
            .set("invertKeyword", invert)
    }

    pub fn json_query(
        self,
        path: impl Into<String>,
        operator: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        self.set("jsonPath", path.into())
            .set("jsonPathOperator", operator.into())
            .set("expectedValue", expected.into())
    }

    pub fn remote_browser(self, browser: Value) -> Self {
        self.set("remote_browser", browser)
    }

    // Network targets

    pub fn hostname(self, hostname: impl Into<String>) -> Self {
        self.set("hostname", hostname.into())
    }

    pub fn port(self, port: u16) -> Self {
        self.set("port", port)
    }

    pub fn ip_family(self, family: impl Into<String>) -> Self {
        self.set("ipFamily", family.into())
    }

    pub fn ping(self, packet_size: i64, count: i64, per_request_timeout: i64) -> Self {
        self.set("packetSize", packet_size)
            .set("ping_count", count)
            .set("ping_per_request_timeout", per_request_timeout)
    }

    pub fn ping_numeric(self, numeric: bool) -> Self {
        self.set("ping_numeric", numeric)
    }

    pub fn dns(self, resolver: impl Into<String>, record_type: impl Into<String>) -> Self {
        self.set("dns_resolve_server", resolver.into())
            .set("dns_resolve_type", record_type.into())
    }

    // Docker

    pub fn docker(self, container: impl Into<String>, host_id: i64) -> Self {
        self.set("docker_container", container.into())
            .set("docker_host", host_id)
    }

    // gRPC

    pub fn grpc(self, url: impl Into<String>, service: impl Into<String>, method: impl Into<String>) -> Self {
        self.set("grpcUrl", url.into())
            .set("grpcServiceName", service.into())
            .set("grpcMethod", method.into())
    }

    pub fn grpc_tls(self, enabled: bool) -> Self {
        self.set("grpcEnableTls", enabled)
    }

    pub fn grpc_payload(self, protobuf: impl Into<String>, body: impl Into<String>) -> Self {
        self.set("grpcProtobuf", protobuf.into())
            .set("grpcBody", body.into())
    }

    pub fn grpc_metadata(self, metadata: impl Into<String>) -> Self {
        self.set("grpcMetadata", metadata.into())
    }

    // MQTT

    pub fn mqtt_topic(self, topic: impl Into<String>) -> Self {
        self.set("mqttTopic", topic.into())
    }

    pub fn mqtt_credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.set("mqttUsername", username.into())
            .set("mqttPassword", password.into())
    }

    pub fn mqtt_check(self, check_type: impl Into<String>, success_message: impl Into<String>) -> Self {
        self.set("mqttCheckType", check_type.into())
            .set("mqttSuccessMessage", success_message.into())
    }

    pub fn mqtt_websocket_path(self, path: impl Into<String>) -> Self {
        self.set("mqttWebsocketPath", path.into())
    }

    // Databases

    pub fn database(self, connection_string: impl Into<String>, query: Option<&str>) -> Self {
        self.set("databaseConnectionString", connection_string.into())
            .set_opt("databaseQuery", query)
    }

    // RADIUS

    pub fn radius(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
        secret: impl Into<String>,
        called_station_id: impl Into<String>,
    ) -> Self {
        self.set("radiusUsername", username.into())
            .set("radiusPassword", password.into())
            .set("radiusSecret", secret.into())
            .set("radiusCalledStationId", called_station_id.into())
    }

    pub fn radius_calling_station(self, id: impl Into<String>) -> Self {
        self.set("radiusCallingStationId", id.into())
    }

    // Game servers

    pub fn game(self, game: impl Into<String>, given_port_only: bool) -> Self {
        self.set("game", game.into())
            .set("gamedigGivenPortOnly", given_port_only)
    }

    // Kafka

    pub fn kafka_producer<I, S>(self, brokers: I, topic: impl Into<String>, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let brokers: Vec<Value> = brokers.into_iter().map(|b| Value::String(b.into())).collect();
        self.set("kafkaProducerBrokers", brokers)
            .set("kafkaProducerTopic", topic.into())
            .set("kafkaProducerMessage", message.into())
    }

    pub fn kafka_options(self, ssl: bool, allow_auto_topic_creation: bool) -> Self {
        self.set("kafkaProducerSsl", ssl)
            .set("kafkaProducerAllowAutoTopicCreation", allow_auto_topic_creation)
    }

    pub fn kafka_sasl(self, mechanism: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.set(
            "kafkaProducerSaslOptions",
            json!({
                "mechanism": mechanism.into(),
                "username": username.into(),
                "password": password.into(),
            }),
        )
    }

    // RabbitMQ

    pub fn rabbitmq<I, S>(self, nodes: I, username: impl Into<String>, password: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: Vec<Value> = nodes.into_iter().map(|n| Value::String(n.into())).collect();
        self.set("rabbitmqNodes", nodes)
            .set("rabbitmqUsername", username.into())
            .set("rabbitmqPassword", password.into())
    }

    // SNMP

    pub fn snmp(self, version: impl Into<String>, oid: impl Into<String>, community: impl Into<String>) -> Self {
        self.set("snmpVersion", version.into())
            .set("jsonPath", oid.into())
            .set("radiusPassword", community.into())
    }

    pub fn snmp_expect(self, operator: impl Into<String>, expected: impl Into<String>) -> Self {
        self.set("jsonPathOperator", operator.into())
            .set("expectedValue", expected.into())
    }

    /// The assembled payload, or the attributes the chosen type cannot carry.
    pub fn build(self) -> Result<Value, BuildError> {
        if let Some(kind) = self.kind {
            let mut foreign: Vec<String> = self
                .fields
                .keys()
                .filter(|key| !kind.accepts(key))
                .cloned()
                .collect();
            foreign.sort();
            if !foreign.is_empty() {
                return Err(BuildError::NotApplicable {
                    fields: foreign,
                    monitor_type: kind,
                });
            }
        }
        Ok(Value::Object(self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builds_flat_payload() {
        let payload = MonitorConfigBuilder::new()
            .kind(MonitorType::Keyword)
            .name("api")
            .url("https://example.com/health")
            .keyword("ok", false)
            .interval(30)
            .build()
            .unwrap();

        assert_eq!(
            payload,
            json!({
                "type": "keyword",
                "name": "api",
                "url": "https://example.com/health",
                "keyword": "ok",
                "invertKeyword": false,
                "interval": 30
            })
        );
    }

    #[test]
    fn test_rejects_attributes_outside_type() {
        let result = MonitorConfigBuilder::new()
            .kind(MonitorType::Ping)
            .name("gw")
            .hostname("10.0.0.1")
            .url("https://example.com")
            .build();

        assert_matches!(
            result,
            Err(BuildError::NotApplicable { ref fields, monitor_type: MonitorType::Ping })
                if fields == &vec!["url".to_string()]
        );
    }

    #[test]
    fn test_type_can_be_chosen_last() {
        let result = MonitorConfigBuilder::new()
            .database("redis://cache:6379", Some("PING"))
            .name("cache")
            .kind(MonitorType::Redis)
            .build();

        // Redis carries no query.
        assert_matches!(result, Err(BuildError::NotApplicable { ref fields, .. }) if fields == &vec!["databaseQuery".to_string()]);
    }

    #[test]
    fn test_no_validation_without_type() {
        let payload = MonitorConfigBuilder::new().interval(0).build().unwrap();
        assert_eq!(payload, json!({ "interval": 0 }));
    }
}
