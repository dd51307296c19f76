//! Type-specific monitor settings.
//!
//! Each monitor type owns one settings struct. Serializing a [`Probe`] emits
//! the `type` tag plus exactly the keys that type understands, using the
//! engine's own key names.

use serde::Serialize;
use serde_json::{json, Map, Value};

use shared_models::validation::{FieldReader, Presence};

use super::monitor_type::MonitorType;

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];
const BODY_ENCODINGS: &[&str] = &["json", "form", "xml"];
const AUTH_METHODS: &[&str] = &["", "basic", "ntlm", "mtls", "oauth2-cc"];
const OAUTH_AUTH_METHODS: &[&str] = &["client_secret_basic", "client_secret_post"];
const JSON_PATH_OPERATORS: &[&str] = &["==", "!=", "<", "<=", ">", ">=", "contains"];
const IP_FAMILIES: &[&str] = &["ipv4", "ipv6"];
pub const DNS_RECORD_TYPES: &[&str] = &[
    "A", "AAAA", "CAA", "CNAME", "MX", "NS", "PTR", "SOA", "SRV", "TXT",
];
const MQTT_CHECK_TYPES: &[&str] = &["keyword", "json-query"];
const SNMP_VERSIONS: &[&str] = &["1", "2c", "3"];

const MAX_PORT: i64 = 65535;

fn read_port(r: &mut FieldReader<'_>, key: &str) -> u16 {
    r.required_int(key, 1, MAX_PORT) as u16
}

fn port_or(r: &mut FieldReader<'_>, key: &str, default: u16) -> u16 {
    r.int_in(key, i64::from(default), 1, MAX_PORT) as u16
}

/// An optional string restricted to a vocabulary.
fn optional_one_of(r: &mut FieldReader<'_>, key: &str, allowed: &[&str]) -> Option<String> {
    let value = r.optional_str(key)?;
    if allowed.contains(&value.as_str()) {
        Some(value)
    } else {
        r.reject(key, format!("must be one of: {}", allowed.join(", ")));
        None
    }
}

/// A non-empty list whose items are non-empty strings.
fn string_list(r: &mut FieldReader<'_>, key: &str) -> Vec<String> {
    let items = r.required_list(key);
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) if !s.trim().is_empty() => values.push(s),
            _ => {
                r.reject(key, "must contain only non-empty strings");
                return Vec::new();
            }
        }
    }
    values
}

fn status_codes(r: &mut FieldReader<'_>) -> Vec<String> {
    let items = r.list_or("accepted_statuscodes", vec![json!("200-299")]);
    let mut codes = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(code) => codes.push(code),
            _ => {
                r.reject("accepted_statuscodes", "must contain only strings");
                return Vec::new();
            }
        }
    }
    codes
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicAuth {
    #[serde(rename = "basic_auth_user")]
    pub user: String,
    #[serde(rename = "basic_auth_pass")]
    pub pass: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NtlmAuth {
    #[serde(rename = "basic_auth_user")]
    pub user: String,
    #[serde(rename = "basic_auth_pass")]
    pub pass: String,
    #[serde(rename = "authDomain")]
    pub domain: String,
    #[serde(rename = "authWorkstation", skip_serializing_if = "Option::is_none")]
    pub workstation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MtlsAuth {
    #[serde(rename = "tlsCert")]
    pub cert: String,
    #[serde(rename = "tlsKey")]
    pub key: String,
    #[serde(rename = "tlsCa", skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthClientCredentials {
    #[serde(rename = "oauth_auth_method")]
    pub auth_method: String,
    #[serde(rename = "oauth_token_url")]
    pub token_url: String,
    #[serde(rename = "oauth_client_id")]
    pub client_id: String,
    #[serde(rename = "oauth_client_secret")]
    pub client_secret: String,
    #[serde(rename = "oauth_scopes", skip_serializing_if = "Option::is_none")]
    pub scopes: Option<String>,
}

/// HTTP authentication, discriminated by `authMethod`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "authMethod")]
pub enum HttpAuth {
    #[serde(rename = "")]
    None,
    #[serde(rename = "basic")]
    Basic(BasicAuth),
    #[serde(rename = "ntlm")]
    Ntlm(NtlmAuth),
    #[serde(rename = "mtls")]
    Mtls(MtlsAuth),
    #[serde(rename = "oauth2-cc")]
    OAuth2ClientCredentials(OAuthClientCredentials),
}

impl HttpAuth {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let method = match r.presence("authMethod") {
            Presence::Null => String::new(),
            // A patch that leaves the method alone may still touch credentials.
            Presence::Absent if r.is_partial() => {
                for key in [
                    "basic_auth_user",
                    "basic_auth_pass",
                    "authDomain",
                    "authWorkstation",
                    "tlsCert",
                    "tlsKey",
                    "tlsCa",
                    "oauth_token_url",
                    "oauth_client_id",
                    "oauth_client_secret",
                    "oauth_scopes",
                ] {
                    r.optional_str(key);
                }
                optional_one_of(r, "oauth_auth_method", OAUTH_AUTH_METHODS);
                return HttpAuth::None;
            }
            _ => r.one_of("authMethod", "", AUTH_METHODS),
        };

        match method.as_str() {
            "basic" => HttpAuth::Basic(BasicAuth {
                user: r.required_str("basic_auth_user"),
                pass: r.required_str("basic_auth_pass"),
            }),
            "ntlm" => HttpAuth::Ntlm(NtlmAuth {
                user: r.required_str("basic_auth_user"),
                pass: r.required_str("basic_auth_pass"),
                domain: r.required_str("authDomain"),
                workstation: r.optional_str("authWorkstation"),
            }),
            "mtls" => HttpAuth::Mtls(MtlsAuth {
                cert: r.required_str("tlsCert"),
                key: r.required_str("tlsKey"),
                ca: r.optional_str("tlsCa"),
            }),
            "oauth2-cc" => HttpAuth::OAuth2ClientCredentials(OAuthClientCredentials {
                auth_method: r.one_of("oauth_auth_method", "client_secret_basic", OAUTH_AUTH_METHODS),
                token_url: r.required_str("oauth_token_url"),
                client_id: r.required_str("oauth_client_id"),
                client_secret: r.required_str("oauth_client_secret"),
                scopes: r.optional_str("oauth_scopes"),
            }),
            _ => HttpAuth::None,
        }
    }
}

/// Request settings shared by the HTTP family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    #[serde(rename = "httpBodyEncoding")]
    pub body_encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    pub maxredirects: i64,
    pub accepted_statuscodes: Vec<String>,
    #[serde(rename = "expiryNotification")]
    pub expiry_notification: bool,
    #[serde(rename = "ignoreTls")]
    pub ignore_tls: bool,
    #[serde(rename = "proxyId", skip_serializing_if = "Option::is_none")]
    pub proxy_id: Option<i64>,
    pub timeout: i64,
    #[serde(rename = "cacheBust")]
    pub cache_bust: bool,
    #[serde(flatten)]
    pub auth: HttpAuth,
}

impl HttpRequest {
    fn read(r: &mut FieldReader<'_>) -> Self {
        let headers = r.optional_str("headers");
        if let Some(text) = &headers {
            if !text.trim().is_empty() && serde_json::from_str::<Map<String, Value>>(text).is_err() {
                r.reject("headers", "must be a JSON object encoded as a string");
            }
        }

        Self {
            url: r.required_str("url"),
            method: r.one_of("method", "GET", HTTP_METHODS),
            body_encoding: r.one_of("httpBodyEncoding", "json", BODY_ENCODINGS),
            body: r.optional_str("body"),
            headers,
            maxredirects: r.int_or("maxredirects", 10, 0),
            accepted_statuscodes: status_codes(r),
            expiry_notification: r.bool_or("expiryNotification", false),
            ignore_tls: r.bool_or("ignoreTls", false),
            proxy_id: r.optional_int("proxyId", 1),
            timeout: r.int_or("timeout", 48, 0),
            cache_bust: r.bool_or("cacheBust", false),
            auth: HttpAuth::read(r),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordProbe {
    #[serde(flatten)]
    pub request: HttpRequest,
    pub keyword: String,
    #[serde(rename = "invertKeyword")]
    pub invert_keyword: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonQueryProbe {
    #[serde(flatten)]
    pub request: HttpRequest,
    #[serde(rename = "jsonPath")]
    pub json_path: String,
    #[serde(rename = "jsonPathOperator")]
    pub operator: String,
    #[serde(rename = "expectedValue")]
    pub expected_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserProbe {
    pub url: String,
    pub timeout: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_browser: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostPort {
    pub hostname: String,
    pub port: u16,
}

impl HostPort {
    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            hostname: r.required_str("hostname"),
            port: read_port(r, "port"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PingProbe {
    pub hostname: String,
    #[serde(rename = "packetSize")]
    pub packet_size: i64,
    pub ping_count: i64,
    pub ping_numeric: bool,
    pub ping_per_request_timeout: i64,
    #[serde(rename = "ipFamily", skip_serializing_if = "Option::is_none")]
    pub ip_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsProbe {
    pub hostname: String,
    pub port: u16,
    pub dns_resolve_server: String,
    pub dns_resolve_type: String,
    #[serde(rename = "ipFamily", skip_serializing_if = "Option::is_none")]
    pub ip_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DockerProbe {
    pub docker_container: String,
    pub docker_host: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrpcProbe {
    #[serde(rename = "grpcUrl")]
    pub url: String,
    #[serde(rename = "grpcEnableTls")]
    pub enable_tls: bool,
    #[serde(rename = "grpcServiceName")]
    pub service_name: String,
    #[serde(rename = "grpcMethod", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(rename = "grpcProtobuf", skip_serializing_if = "Option::is_none")]
    pub protobuf: Option<String>,
    #[serde(rename = "grpcBody", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(rename = "grpcMetadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    pub keyword: String,
    #[serde(rename = "invertKeyword")]
    pub invert_keyword: bool,
    pub maxredirects: i64,
    pub accepted_statuscodes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MqttProbe {
    pub hostname: String,
    pub port: u16,
    #[serde(rename = "mqttTopic")]
    pub topic: String,
    #[serde(rename = "mqttUsername", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "mqttPassword", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "mqttSuccessMessage", skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(rename = "mqttCheckType")]
    pub check_type: String,
    #[serde(rename = "mqttWebsocketPath", skip_serializing_if = "Option::is_none")]
    pub websocket_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlProbe {
    #[serde(rename = "databaseConnectionString")]
    pub connection_string: String,
    #[serde(rename = "databaseQuery", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionProbe {
    #[serde(rename = "databaseConnectionString")]
    pub connection_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusProbe {
    pub hostname: String,
    pub port: u16,
    #[serde(rename = "radiusUsername")]
    pub username: String,
    #[serde(rename = "radiusPassword")]
    pub password: String,
    #[serde(rename = "radiusSecret")]
    pub secret: String,
    #[serde(rename = "radiusCalledStationId")]
    pub called_station_id: String,
    #[serde(rename = "radiusCallingStationId", skip_serializing_if = "Option::is_none")]
    pub calling_station_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GamedigProbe {
    pub game: String,
    pub hostname: String,
    pub port: u16,
    #[serde(rename = "gamedigGivenPortOnly")]
    pub given_port_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KafkaProbe {
    #[serde(rename = "kafkaProducerBrokers")]
    pub brokers: Vec<String>,
    #[serde(rename = "kafkaProducerTopic")]
    pub topic: String,
    #[serde(rename = "kafkaProducerMessage")]
    pub message: String,
    #[serde(rename = "kafkaProducerSsl")]
    pub ssl: bool,
    #[serde(rename = "kafkaProducerAllowAutoTopicCreation")]
    pub allow_auto_topic_creation: bool,
    #[serde(rename = "kafkaProducerSaslOptions", skip_serializing_if = "Option::is_none")]
    pub sasl_options: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RabbitMqProbe {
    #[serde(rename = "rabbitmqNodes")]
    pub nodes: Vec<String>,
    #[serde(rename = "rabbitmqUsername")]
    pub username: String,
    #[serde(rename = "rabbitmqPassword")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnmpProbe {
    pub hostname: String,
    pub port: u16,
    #[serde(rename = "snmpVersion")]
    pub version: String,
    /// The OID to query; the engine stores it under `jsonPath`.
    #[serde(rename = "jsonPath")]
    pub oid: String,
    #[serde(rename = "jsonPathOperator")]
    pub operator: String,
    #[serde(rename = "expectedValue", skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
    /// Community string, stored under `radiusPassword` by the engine.
    #[serde(rename = "radiusPassword", skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailscaleProbe {
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Probe {
    #[serde(rename = "http")]
    Http(HttpRequest),
    #[serde(rename = "keyword")]
    Keyword(KeywordProbe),
    #[serde(rename = "json-query")]
    JsonQuery(JsonQueryProbe),
    #[serde(rename = "real-browser")]
    RealBrowser(BrowserProbe),
    #[serde(rename = "port")]
    Port(HostPort),
    #[serde(rename = "ping")]
    Ping(PingProbe),
    #[serde(rename = "dns")]
    Dns(DnsProbe),
    #[serde(rename = "docker")]
    Docker(DockerProbe),
    #[serde(rename = "grpc-keyword")]
    GrpcKeyword(GrpcProbe),
    #[serde(rename = "mqtt")]
    Mqtt(MqttProbe),
    #[serde(rename = "sqlserver")]
    SqlServer(SqlProbe),
    #[serde(rename = "postgres")]
    Postgres(SqlProbe),
    #[serde(rename = "mysql")]
    MySql(SqlProbe),
    #[serde(rename = "mongodb")]
    MongoDb(ConnectionProbe),
    #[serde(rename = "redis")]
    Redis(ConnectionProbe),
    #[serde(rename = "radius")]
    Radius(RadiusProbe),
    #[serde(rename = "gamedig")]
    Gamedig(GamedigProbe),
    #[serde(rename = "kafka-producer")]
    KafkaProducer(KafkaProbe),
    #[serde(rename = "rabbitmq")]
    RabbitMq(RabbitMqProbe),
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "steam")]
    Steam(HostPort),
    #[serde(rename = "snmp")]
    Snmp(SnmpProbe),
    #[serde(rename = "tailscale-ping")]
    TailscalePing(TailscaleProbe),
}

impl Probe {
    pub fn monitor_type(&self) -> MonitorType {
        match self {
            Probe::Http(_) => MonitorType::Http,
            Probe::Keyword(_) => MonitorType::Keyword,
            Probe::JsonQuery(_) => MonitorType::JsonQuery,
            Probe::RealBrowser(_) => MonitorType::RealBrowser,
            Probe::Port(_) => MonitorType::Port,
            Probe::Ping(_) => MonitorType::Ping,
            Probe::Dns(_) => MonitorType::Dns,
            Probe::Docker(_) => MonitorType::Docker,
            Probe::GrpcKeyword(_) => MonitorType::GrpcKeyword,
            Probe::Mqtt(_) => MonitorType::Mqtt,
            Probe::SqlServer(_) => MonitorType::SqlServer,
            Probe::Postgres(_) => MonitorType::Postgres,
            Probe::MySql(_) => MonitorType::MySql,
            Probe::MongoDb(_) => MonitorType::MongoDb,
            Probe::Redis(_) => MonitorType::Redis,
            Probe::Radius(_) => MonitorType::Radius,
            Probe::Gamedig(_) => MonitorType::Gamedig,
            Probe::KafkaProducer(_) => MonitorType::KafkaProducer,
            Probe::RabbitMq(_) => MonitorType::RabbitMq,
            Probe::Group => MonitorType::Group,
            Probe::Steam(_) => MonitorType::Steam,
            Probe::Snmp(_) => MonitorType::Snmp,
            Probe::TailscalePing(_) => MonitorType::TailscalePing,
        }
    }

    /// Read the settings for `kind`, recording problems on the reader.
    pub fn read(kind: MonitorType, r: &mut FieldReader<'_>) -> Self {
        match kind {
            MonitorType::Http => Probe::Http(HttpRequest::read(r)),
            MonitorType::Keyword => Probe::Keyword(KeywordProbe {
                request: HttpRequest::read(r),
                keyword: r.required_str("keyword"),
                invert_keyword: r.bool_or("invertKeyword", false),
            }),
            MonitorType::JsonQuery => Probe::JsonQuery(JsonQueryProbe {
                request: HttpRequest::read(r),
                json_path: r.required_str("jsonPath"),
                operator: r.one_of("jsonPathOperator", "==", JSON_PATH_OPERATORS),
                expected_value: r.required_str("expectedValue"),
            }),
            MonitorType::RealBrowser => Probe::RealBrowser(BrowserProbe {
                url: r.required_str("url"),
                timeout: r.int_or("timeout", 48, 0),
                remote_browser: r.optional_value("remote_browser"),
            }),
            MonitorType::Port => Probe::Port(HostPort::read(r)),
            MonitorType::Steam => Probe::Steam(HostPort::read(r)),
            MonitorType::Ping => Probe::Ping(PingProbe {
                hostname: r.required_str("hostname"),
                packet_size: r.int_in("packetSize", 56, 1, 65500),
                ping_count: r.int_or("ping_count", 3, 1),
                ping_numeric: r.bool_or("ping_numeric", true),
                ping_per_request_timeout: r.int_or("ping_per_request_timeout", 2, 1),
                ip_family: optional_one_of(r, "ipFamily", IP_FAMILIES),
            }),
            MonitorType::Dns => Probe::Dns(DnsProbe {
                hostname: r.required_str("hostname"),
                port: port_or(r, "port", 53),
                dns_resolve_server: r.str_or("dns_resolve_server", "1.1.1.1"),
                dns_resolve_type: r.one_of("dns_resolve_type", "A", DNS_RECORD_TYPES),
                ip_family: optional_one_of(r, "ipFamily", IP_FAMILIES),
            }),
            MonitorType::Docker => Probe::Docker(DockerProbe {
                docker_container: r.required_str("docker_container"),
                docker_host: r.required_int("docker_host", 1, i64::MAX),
            }),
            MonitorType::GrpcKeyword => Probe::GrpcKeyword(GrpcProbe {
                url: r.required_str("grpcUrl"),
                enable_tls: r.bool_or("grpcEnableTls", false),
                service_name: r.required_str("grpcServiceName"),
                method: r.optional_str("grpcMethod"),
                protobuf: r.optional_str("grpcProtobuf"),
                body: r.optional_str("grpcBody"),
                metadata: r.optional_str("grpcMetadata"),
                keyword: r.required_str("keyword"),
                invert_keyword: r.bool_or("invertKeyword", false),
                maxredirects: r.int_or("maxredirects", 10, 0),
                accepted_statuscodes: status_codes(r),
            }),
            MonitorType::Mqtt => Probe::Mqtt(MqttProbe {
                hostname: r.required_str("hostname"),
                port: read_port(r, "port"),
                topic: r.required_str("mqttTopic"),
                username: r.optional_str("mqttUsername"),
                password: r.optional_str("mqttPassword"),
                success_message: r.optional_str("mqttSuccessMessage"),
                check_type: r.one_of("mqttCheckType", "keyword", MQTT_CHECK_TYPES),
                websocket_path: r.optional_str("mqttWebsocketPath"),
            }),
            MonitorType::SqlServer => Probe::SqlServer(SqlProbe::read(r)),
            MonitorType::Postgres => Probe::Postgres(SqlProbe::read(r)),
            MonitorType::MySql => Probe::MySql(SqlProbe::read(r)),
            MonitorType::MongoDb => Probe::MongoDb(ConnectionProbe {
                connection_string: r.required_str("databaseConnectionString"),
            }),
            MonitorType::Redis => Probe::Redis(ConnectionProbe {
                connection_string: r.required_str("databaseConnectionString"),
            }),
            MonitorType::Radius => Probe::Radius(RadiusProbe {
                hostname: r.required_str("hostname"),
                port: port_or(r, "port", 1812),
                username: r.required_str("radiusUsername"),
                password: r.required_str("radiusPassword"),
                secret: r.required_str("radiusSecret"),
                called_station_id: r.required_str("radiusCalledStationId"),
                calling_station_id: r.optional_str("radiusCallingStationId"),
            }),
            MonitorType::Gamedig => Probe::Gamedig(GamedigProbe {
                game: r.required_str("game"),
                hostname: r.required_str("hostname"),
                port: read_port(r, "port"),
                given_port_only: r.bool_or("gamedigGivenPortOnly", false),
            }),
            MonitorType::KafkaProducer => Probe::KafkaProducer(KafkaProbe {
                brokers: string_list(r, "kafkaProducerBrokers"),
                topic: r.required_str("kafkaProducerTopic"),
                message: r.required_str("kafkaProducerMessage"),
                ssl: r.bool_or("kafkaProducerSsl", false),
                allow_auto_topic_creation: r.bool_or("kafkaProducerAllowAutoTopicCreation", false),
                sasl_options: r.optional_object("kafkaProducerSaslOptions"),
            }),
            MonitorType::RabbitMq => Probe::RabbitMq(RabbitMqProbe {
                nodes: string_list(r, "rabbitmqNodes"),
                username: r.required_str("rabbitmqUsername"),
                password: r.required_str("rabbitmqPassword"),
            }),
            MonitorType::Group => Probe::Group,
            MonitorType::Snmp => Probe::Snmp(SnmpProbe {
                hostname: r.required_str("hostname"),
                port: port_or(r, "port", 161),
                version: r.one_of("snmpVersion", "2c", SNMP_VERSIONS),
                oid: r.required_str("jsonPath"),
                operator: r.one_of("jsonPathOperator", "==", JSON_PATH_OPERATORS),
                expected_value: r.optional_str("expectedValue"),
                community: r.optional_str("radiusPassword"),
            }),
            MonitorType::TailscalePing => Probe::TailscalePing(TailscaleProbe {
                hostname: r.required_str("hostname"),
            }),
        }
    }
}

impl SqlProbe {
    fn read(r: &mut FieldReader<'_>) -> Self {
        Self {
            connection_string: r.required_str("databaseConnectionString"),
            query: r.optional_str("databaseQuery"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(kind: MonitorType, payload: Value) -> (Probe, Result<(), shared_models::ValidationError>) {
        let raw = payload.as_object().cloned().unwrap();
        let mut reader = FieldReader::new(&raw, false);
        let probe = Probe::read(kind, &mut reader);
        (probe, reader.finish())
    }

    #[test]
    fn test_http_defaults() {
        let (probe, result) = read(MonitorType::Http, json!({ "url": "https://example.com" }));
        assert!(result.is_ok());

        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value["type"], "http");
        assert_eq!(value["method"], "GET");
        assert_eq!(value["maxredirects"], 10);
        assert_eq!(value["accepted_statuscodes"], json!(["200-299"]));
        assert_eq!(value["timeout"], 48);
        assert_eq!(value["authMethod"], "");
    }

    #[test]
    fn test_basic_auth_requires_credentials() {
        let (_, result) = read(
            MonitorType::Http,
            json!({ "url": "https://example.com", "authMethod": "basic", "basic_auth_user": "admin" }),
        );
        let err = result.unwrap_err();
        assert_eq!(err.fields(), vec!["basic_auth_pass"]);
    }

    #[test]
    fn test_oauth_defaults_auth_method() {
        let (probe, result) = read(
            MonitorType::Keyword,
            json!({
                "url": "https://example.com",
                "keyword": "ok",
                "authMethod": "oauth2-cc",
                "oauth_token_url": "https://auth.example.com/token",
                "oauth_client_id": "id",
                "oauth_client_secret": "secret"
            }),
        );
        assert!(result.is_ok());
        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value["oauth_auth_method"], "client_secret_basic");
        assert_eq!(value["keyword"], "ok");
    }

    #[test]
    fn test_headers_must_be_json_text() {
        let (_, result) = read(
            MonitorType::Http,
            json!({ "url": "https://example.com", "headers": "not json" }),
        );
        assert!(result.unwrap_err().has_field("headers"));
    }

    #[test]
    fn test_dns_record_type_vocabulary() {
        let (probe, result) = read(MonitorType::Dns, json!({ "hostname": "example.com" }));
        assert!(result.is_ok());
        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value["port"], 53);
        assert_eq!(value["dns_resolve_type"], "A");

        let (_, result) = read(
            MonitorType::Dns,
            json!({ "hostname": "example.com", "dns_resolve_type": "ANY" }),
        );
        assert!(result.unwrap_err().has_field("dns_resolve_type"));
    }

    #[test]
    fn test_port_bounds() {
        let (_, result) = read(MonitorType::Port, json!({ "hostname": "h", "port": 0 }));
        assert!(result.unwrap_err().has_field("port"));

        let (probe, result) = read(MonitorType::Port, json!({ "hostname": "h", "port": 65535 }));
        assert!(result.is_ok());
        assert_eq!(probe, Probe::Port(HostPort { hostname: "h".into(), port: 65535 }));
    }

    #[test]
    fn test_kafka_brokers_must_be_strings() {
        let (_, result) = read(
            MonitorType::KafkaProducer,
            json!({
                "kafkaProducerBrokers": ["broker:9092", 5],
                "kafkaProducerTopic": "events",
                "kafkaProducerMessage": "{}"
            }),
        );
        assert!(result.unwrap_err().has_field("kafkaProducerBrokers"));
    }

    #[test]
    fn test_group_has_no_settings() {
        let (probe, result) = read(MonitorType::Group, json!({}));
        assert!(result.is_ok());
        assert_eq!(serde_json::to_value(&probe).unwrap(), json!({ "type": "group" }));
    }
}
