//! End-to-end scenarios through the public API.
//! Run: cargo test -p intercept-log --test end_to_end

use intercept_log::prelude::*;
use intercept_log::{
    ConfigError, FieldLabel, InterceptorBuilder, MemoryProvider, ProviderOptions, describe_fault,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, thiserror::Error)]
#[error("insufficient funds")]
struct InsufficientFunds;

#[derive(Debug, thiserror::Error)]
#[error("payment failed")]
struct PaymentFailed(#[source] InsufficientFunds);

struct PaymentService {
    balance: i64,
}

impl PaymentService {
    fn charge(&self, amount: i64, _card_number: &str) -> Result<bool, PaymentFailed> {
        if amount > self.balance {
            Err(PaymentFailed(InsufficientFunds))
        } else {
            Ok(true)
        }
    }
}

fn charge_signature() -> MethodSignature {
    MethodSignature::new("charge")
        .param(Parameter::new("amount", "i64"))
        .param(Parameter::new("card_number", "String").masked(MaskRule::new(0, 12).unwrap()))
        .returns("bool")
}

fn charge_call(amount: i64, card: &str) -> CallDescriptor {
    CallDescriptor::new("shop::PaymentService", charge_signature())
        .implements("shop::Payments")
        .arg(amount)
        .arg(card)
}

fn payments_interceptor(memory: &MemoryProvider) -> Interceptor {
    Interceptor::builder()
        .directives(DirectiveRegistry::new().on_type("shop::Payments", Level::Information))
        .provider(memory.clone())
        .host("web-01")
        .build()
}

#[test]
fn charge_success_is_logged_with_masked_card() {
    let memory = MemoryProvider::new("memory");
    let interceptor = payments_interceptor(&memory);
    let service = PaymentService { balance: 500 };
    let card = "4111111111111111";

    let approved = interceptor
        .intercept(&charge_call(100, card), || service.charge(100, card))
        .unwrap();
    assert!(approved);

    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    let line = &lines[0];
    assert!(line.contains("[Args] amount=100, card_number=************1111 "));
    assert!(line.contains("[Host] web-01 "));
    assert!(line.contains("[ReturnValue] true "));
    assert!(line.contains("[ElapsedTime] "));
    assert!(!line.contains("[Error]"));
    assert!(!line.contains(card));
}

#[test]
fn charge_fault_is_logged_and_propagated() {
    let memory = MemoryProvider::new("memory");
    let interceptor = payments_interceptor(&memory);
    let service = PaymentService { balance: 10 };

    let err = interceptor
        .intercept(&charge_call(100, "4111111111111111"), || {
            service.charge(100, "4111111111111111")
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "payment failed");

    let entries = memory.entries();
    assert_eq!(entries.len(), 1);
    let logged = entries[0].get(FieldLabel::Error).unwrap();
    assert!(logged.starts_with("payment failed"));
    assert!(logged.ends_with(" | [Cause 1] insufficient funds"));
    assert_eq!(logged.matches("[Cause ").count(), 1);
    assert!(!entries[0].has(FieldLabel::ReturnValue));
}

#[test]
fn fault_without_backtraces_is_exactly_the_cause_chain() {
    let memory = MemoryProvider::new("memory");
    let interceptor = Interceptor::builder()
        .directives(DirectiveRegistry::new().on_type("shop::Payments", Level::Information))
        .provider(memory.clone())
        .backtraces(false)
        .build();
    let service = PaymentService { balance: 0 };

    let err = interceptor
        .intercept(&charge_call(1, "4111111111111111"), || {
            service.charge(1, "4111111111111111")
        })
        .unwrap_err();

    assert_eq!(
        memory.entries()[0].get(FieldLabel::Error),
        Some(describe_fault(&err).as_str())
    );
    assert_eq!(
        describe_fault(&err),
        "payment failed | [Cause 1] insufficient funds"
    );
}

#[test]
fn configuration_document_drives_file_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.log");

    let document = json!({
        "Enabled": true,
        "MinimumLevel": "Information",
        "Filter": { "IgnoreMethods": ["ping"] },
        "Providers": {
            "Audit": {
                "Enabled": true,
                "Type": "File",
                "Parameters": { "FilePath": path.to_string_lossy() }
            },
            "Muted": { "Enabled": false, "Type": "console" }
        }
    });
    let config = LogConfig::from_json_str(&document.to_string()).unwrap();

    let interceptor = InterceptorBuilder::from_config(&config, &ProviderFactory::new())
        .unwrap()
        .directives(DirectiveRegistry::new().on_type("shop::PaymentService", Level::Warning))
        .host("web-02")
        .build();
    assert_eq!(interceptor.provider_names(), ["Audit"]);

    let service = PaymentService { balance: 500 };
    interceptor
        .intercept(&charge_call(5, "5500000000000004"), || {
            service.charge(5, "5500000000000004")
        })
        .unwrap();

    let ping = CallDescriptor::new("shop::PaymentService", MethodSignature::new("ping"));
    interceptor.intercept_infallible(&ping, || ());

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("[Level] Warning "));
    assert!(lines[0].contains("card_number=************0004"));
}

#[test]
fn misconfigured_provider_fails_at_setup() {
    let mut providers = BTreeMap::new();
    providers.insert("Audit".to_string(), ProviderOptions::new("file"));
    let config = LogConfig {
        providers,
        ..LogConfig::default()
    };

    let err = InterceptorBuilder::from_config(&config, &ProviderFactory::new()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingParameter { .. }));

    let config = LogConfig::new().with_provider("Remote", ProviderOptions::new("carrier-pigeon"));
    let err = InterceptorBuilder::from_config(&config, &ProviderFactory::new()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownProviderType { .. }));
}

#[test]
fn method_directive_overrides_interface_directive() {
    let memory = MemoryProvider::new("memory");
    let registry = DirectiveRegistry::new()
        .on_type("shop::Payments", Level::Information)
        .on_method(
            charge_signature().method_id("shop::PaymentService"),
            Level::Critical,
        );
    let interceptor = Interceptor::builder()
        .directives(registry)
        .filter(LogFilterConfig::new().with_minimum_level(Level::Error))
        .provider(memory.clone())
        .build();

    let service = PaymentService { balance: 500 };
    interceptor
        .intercept(&charge_call(1, "4111111111111111"), || {
            service.charge(1, "4111111111111111")
        })
        .unwrap();

    let entries = memory.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level(), Some(Level::Critical));
}

#[test]
fn bootstrap_logger_writes_messages() {
    let memory = MemoryProvider::new("memory");
    let logger = BootstrapLogger::new("shop")
        .with_host("web-03")
        .with_provider(memory.clone());

    logger.info("pipeline ready");
    logger.error("provider failed", &PaymentFailed(InsufficientFunds));

    let lines = memory.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[AppName] shop "));
    assert!(lines[0].ends_with("pipeline ready"));
    assert!(lines[1].contains("provider failed - payment failed | [Cause 1] insufficient funds"));
}
