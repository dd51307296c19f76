use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keys every monitor accepts regardless of its type.
pub const COMMON_FIELDS: &[&str] = &[
    "type",
    "name",
    "parent",
    "description",
    "interval",
    "retryInterval",
    "resendInterval",
    "maxretries",
    "upsideDown",
    "notificationIDList",
    "conditions",
];

pub const HTTP_FIELDS: &[&str] = &[
    "url",
    "method",
    "httpBodyEncoding",
    "body",
    "headers",
    "maxredirects",
    "accepted_statuscodes",
    "expiryNotification",
    "ignoreTls",
    "proxyId",
    "timeout",
    "cacheBust",
    "authMethod",
    "basic_auth_user",
    "basic_auth_pass",
    "authDomain",
    "authWorkstation",
    "tlsCert",
    "tlsKey",
    "tlsCa",
    "oauth_auth_method",
    "oauth_token_url",
    "oauth_client_id",
    "oauth_client_secret",
    "oauth_scopes",
];

const KEYWORD_FIELDS: &[&str] = &["keyword", "invertKeyword"];
const JSON_QUERY_FIELDS: &[&str] = &["jsonPath", "jsonPathOperator", "expectedValue"];
const BROWSER_FIELDS: &[&str] = &["url", "timeout", "remote_browser"];
const HOST_PORT_FIELDS: &[&str] = &["hostname", "port"];
const PING_FIELDS: &[&str] = &[
    "hostname",
    "packetSize",
    "ping_count",
    "ping_numeric",
    "ping_per_request_timeout",
    "ipFamily",
];
const DNS_FIELDS: &[&str] = &[
    "hostname",
    "port",
    "dns_resolve_server",
    "dns_resolve_type",
    "ipFamily",
];
const DOCKER_FIELDS: &[&str] = &["docker_container", "docker_host"];
const GRPC_FIELDS: &[&str] = &[
    "grpcUrl",
    "grpcEnableTls",
    "grpcServiceName",
    "grpcMethod",
    "grpcProtobuf",
    "grpcBody",
    "grpcMetadata",
    "keyword",
    "invertKeyword",
    "maxredirects",
    "accepted_statuscodes",
];
const MQTT_FIELDS: &[&str] = &[
    "hostname",
    "port",
    "mqttTopic",
    "mqttUsername",
    "mqttPassword",
    "mqttSuccessMessage",
    "mqttCheckType",
    "mqttWebsocketPath",
];
const SQL_FIELDS: &[&str] = &["databaseConnectionString", "databaseQuery"];
const CONNECTION_FIELDS: &[&str] = &["databaseConnectionString"];
const RADIUS_FIELDS: &[&str] = &[
    "hostname",
    "port",
    "radiusUsername",
    "radiusPassword",
    "radiusSecret",
    "radiusCalledStationId",
    "radiusCallingStationId",
];
const GAMEDIG_FIELDS: &[&str] = &["game", "hostname", "port", "gamedigGivenPortOnly"];
const KAFKA_FIELDS: &[&str] = &[
    "kafkaProducerBrokers",
    "kafkaProducerTopic",
    "kafkaProducerMessage",
    "kafkaProducerSsl",
    "kafkaProducerAllowAutoTopicCreation",
    "kafkaProducerSaslOptions",
];
const RABBITMQ_FIELDS: &[&str] = &["rabbitmqNodes", "rabbitmqUsername", "rabbitmqPassword"];
const SNMP_FIELDS: &[&str] = &[
    "hostname",
    "port",
    "snmpVersion",
    "jsonPath",
    "jsonPathOperator",
    "expectedValue",
    "radiusPassword",
];
const TAILSCALE_FIELDS: &[&str] = &["hostname"];

/// The kinds of check the monitoring engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonitorType {
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "keyword")]
    Keyword,
    #[serde(rename = "json-query")]
    JsonQuery,
    #[serde(rename = "real-browser")]
    RealBrowser,
    #[serde(rename = "port")]
    Port,
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "dns")]
    Dns,
    #[serde(rename = "docker")]
    Docker,
    #[serde(rename = "grpc-keyword")]
    GrpcKeyword,
    #[serde(rename = "mqtt")]
    Mqtt,
    #[serde(rename = "sqlserver")]
    SqlServer,
    #[serde(rename = "postgres")]
    Postgres,
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "mongodb")]
    MongoDb,
    #[serde(rename = "redis")]
    Redis,
    #[serde(rename = "radius")]
    Radius,
    #[serde(rename = "gamedig")]
    Gamedig,
    #[serde(rename = "kafka-producer")]
    KafkaProducer,
    #[serde(rename = "rabbitmq")]
    RabbitMq,
    #[serde(rename = "group")]
    Group,
    #[serde(rename = "steam")]
    Steam,
    #[serde(rename = "snmp")]
    Snmp,
    #[serde(rename = "tailscale-ping")]
    TailscalePing,
}

impl MonitorType {
    pub const ALL: [MonitorType; 23] = [
        MonitorType::Http,
        MonitorType::Keyword,
        MonitorType::JsonQuery,
        MonitorType::RealBrowser,
        MonitorType::Port,
        MonitorType::Ping,
        MonitorType::Dns,
        MonitorType::Docker,
        MonitorType::GrpcKeyword,
        MonitorType::Mqtt,
        MonitorType::SqlServer,
        MonitorType::Postgres,
        MonitorType::MySql,
        MonitorType::MongoDb,
        MonitorType::Redis,
        MonitorType::Radius,
        MonitorType::Gamedig,
        MonitorType::KafkaProducer,
        MonitorType::RabbitMq,
        MonitorType::Group,
        MonitorType::Steam,
        MonitorType::Snmp,
        MonitorType::TailscalePing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MonitorType::Http => "http",
            MonitorType::Keyword => "keyword",
            MonitorType::JsonQuery => "json-query",
            MonitorType::RealBrowser => "real-browser",
            MonitorType::Port => "port",
            MonitorType::Ping => "ping",
            MonitorType::Dns => "dns",
            MonitorType::Docker => "docker",
            MonitorType::GrpcKeyword => "grpc-keyword",
            MonitorType::Mqtt => "mqtt",
            MonitorType::SqlServer => "sqlserver",
            MonitorType::Postgres => "postgres",
            MonitorType::MySql => "mysql",
            MonitorType::MongoDb => "mongodb",
            MonitorType::Redis => "redis",
            MonitorType::Radius => "radius",
            MonitorType::Gamedig => "gamedig",
            MonitorType::KafkaProducer => "kafka-producer",
            MonitorType::RabbitMq => "rabbitmq",
            MonitorType::Group => "group",
            MonitorType::Steam => "steam",
            MonitorType::Snmp => "snmp",
            MonitorType::TailscalePing => "tailscale-ping",
        }
    }

    /// Lenient lookup: case-insensitive, `_` accepted in place of `-`.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|kind| kind.as_str() == wanted)
    }

    /// Type-specific keys, excluding the common ones.
    pub fn scope(self) -> Vec<&'static str> {
        let groups: &[&[&str]] = match self {
            MonitorType::Http => &[HTTP_FIELDS],
            MonitorType::Keyword => &[HTTP_FIELDS, KEYWORD_FIELDS],
            MonitorType::JsonQuery => &[HTTP_FIELDS, JSON_QUERY_FIELDS],
            MonitorType::RealBrowser => &[BROWSER_FIELDS],
            MonitorType::Port | MonitorType::Steam => &[HOST_PORT_FIELDS],
            MonitorType::Ping => &[PING_FIELDS],
            MonitorType::Dns => &[DNS_FIELDS],
            MonitorType::Docker => &[DOCKER_FIELDS],
            MonitorType::GrpcKeyword => &[GRPC_FIELDS],
            MonitorType::Mqtt => &[MQTT_FIELDS],
            MonitorType::SqlServer | MonitorType::Postgres | MonitorType::MySql => &[SQL_FIELDS],
            MonitorType::MongoDb | MonitorType::Redis => &[CONNECTION_FIELDS],
            MonitorType::Radius => &[RADIUS_FIELDS],
            MonitorType::Gamedig => &[GAMEDIG_FIELDS],
            MonitorType::KafkaProducer => &[KAFKA_FIELDS],
            MonitorType::RabbitMq => &[RABBITMQ_FIELDS],
            MonitorType::Group => &[],
            MonitorType::Snmp => &[SNMP_FIELDS],
            MonitorType::TailscalePing => &[TAILSCALE_FIELDS],
        };

        let mut keys: Vec<&'static str> = Vec::new();
        for key in groups.iter().flat_map(|group| group.iter()) {
            if !keys.contains(key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Every key a monitor of this type may carry.
    pub fn fields(self) -> Vec<&'static str> {
        let mut keys = COMMON_FIELDS.to_vec();
        keys.extend(self.scope());
        keys
    }

    pub fn accepts(self, key: &str) -> bool {
        COMMON_FIELDS.contains(&key) || self.scope().contains(&key)
    }

    /// Type-specific keys a creation payload must carry (HTTP auth not set).
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            MonitorType::Http | MonitorType::RealBrowser => &["url"],
            MonitorType::Keyword => &["url", "keyword"],
            MonitorType::JsonQuery => &["url", "jsonPath", "expectedValue"],
            MonitorType::Port | MonitorType::Steam => &["hostname", "port"],
            MonitorType::Ping | MonitorType::Dns | MonitorType::TailscalePing => &["hostname"],
            MonitorType::Docker => &["docker_container", "docker_host"],
            MonitorType::GrpcKeyword => &["grpcUrl", "grpcServiceName", "keyword"],
            MonitorType::Mqtt => &["hostname", "port", "mqttTopic"],
            MonitorType::SqlServer
            | MonitorType::Postgres
            | MonitorType::MySql
            | MonitorType::MongoDb
            | MonitorType::Redis => &["databaseConnectionString"],
            MonitorType::Radius => &[
                "hostname",
                "radiusUsername",
                "radiusPassword",
                "radiusSecret",
                "radiusCalledStationId",
            ],
            MonitorType::Gamedig => &["game", "hostname", "port"],
            MonitorType::KafkaProducer => &[
                "kafkaProducerBrokers",
                "kafkaProducerTopic",
                "kafkaProducerMessage",
            ],
            MonitorType::RabbitMq => &["rabbitmqNodes", "rabbitmqUsername", "rabbitmqPassword"],
            MonitorType::Group => &[],
            MonitorType::Snmp => &["hostname", "jsonPath"],
        }
    }

    /// Union of every key any monitor type accepts.
    pub fn all_fields() -> Vec<&'static str> {
        let mut keys = COMMON_FIELDS.to_vec();
        for kind in Self::ALL {
            for key in kind.scope() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}

impl fmt::Display for MonitorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown monitor type '{0}'")]
pub struct UnknownMonitorType(pub String);

impl FromStr for MonitorType {
    type Err = UnknownMonitorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownMonitorType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(MonitorType::parse("HTTP"), Some(MonitorType::Http));
        assert_eq!(MonitorType::parse("json_query"), Some(MonitorType::JsonQuery));
        assert_eq!(MonitorType::parse(" tailscale-ping "), Some(MonitorType::TailscalePing));
        assert_eq!(MonitorType::parse("telnet"), None);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for kind in MonitorType::ALL {
            assert_eq!(kind.as_str().parse::<MonitorType>().unwrap(), kind);
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_required_fields_are_in_scope() {
        for kind in MonitorType::ALL {
            for key in kind.required_fields() {
                assert!(kind.accepts(key), "{} should accept {}", kind, key);
            }
        }
    }

    #[test]
    fn test_scope_excludes_foreign_keys() {
        assert!(MonitorType::Ping.accepts("packetSize"));
        assert!(!MonitorType::Ping.accepts("url"));
        assert!(!MonitorType::Group.accepts("hostname"));
        assert!(MonitorType::Group.accepts("name"));
    }
}
