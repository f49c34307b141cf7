//! Call descriptors: what is being invoked and with which arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::masking::MaskRule;
use crate::value::{LogValue, Loggable, ValueFormatter};

/// Identity of a method: declaring type, name and ordered parameter types.
///
/// Overloads sharing a name are distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodId {
    declaring_type: String,
    name: String,
    parameter_types: Vec<String>,
}

impl MethodId {
    /// Creates a method identity.
    pub fn new<I, S>(declaring_type: impl Into<String>, name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_types: parameter_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Qualified name of the declaring type.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameter type names.
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// The same method as declared on another type, e.g. the interface it
    /// implements.
    pub fn on_type(&self, declaring_type: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: self.name.clone(),
            parameter_types: self.parameter_types.clone(),
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({})",
            self.declaring_type,
            self.name,
            self.parameter_types.join(", ")
        )
    }
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    type_name: String,
    mask: Option<MaskRule>,
}

impl Parameter {
    /// Creates an unmasked parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            mask: None,
        }
    }

    /// Attaches a mask rule to this parameter.
    pub fn masked(mut self, rule: MaskRule) -> Self {
        self.mask = Some(rule);
        self
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Mask rule, if declared.
    pub fn mask(&self) -> Option<&MaskRule> {
        self.mask.as_ref()
    }
}

/// A method signature: name, ordered parameters and return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    parameters: Vec<Parameter>,
    return_type: Option<String>,
}

impl MethodSignature {
    /// Creates a signature with no parameters and no return type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Sets the return type.
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered parameters.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Return type, if any.
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    /// Identity of this method when declared on `declaring_type`.
    pub fn method_id(&self, declaring_type: &str) -> MethodId {
        MethodId::new(
            declaring_type,
            self.name.clone(),
            self.parameters.iter().map(|p| p.type_name.clone()),
        )
    }
}

/// Everything known about one invocation.
///
/// Built fresh for each call and dropped once its entry has been emitted.
#[derive(Debug, Clone)]
pub struct CallDescriptor {
    target_type: String,
    declaring_type: Option<String>,
    module: String,
    signature: MethodSignature,
    interfaces: Vec<String>,
    args: Vec<LogValue>,
}

impl CallDescriptor {
    /// Describes a call to `signature` on the concrete type `target_type`.
    ///
    /// The module defaults to the leading path segment of the target type.
    pub fn new(target_type: impl Into<String>, signature: MethodSignature) -> Self {
        let target_type = target_type.into();
        let module = target_type
            .split("::")
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            target_type,
            declaring_type: None,
            module,
            signature,
            interfaces: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Overrides the module (application) name.
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Marks the invoked method as inherited from `declaring_type`.
    ///
    /// The method identity then names the base type, which is what
    /// [`BaseMethodLookup`](crate::filter::BaseMethodLookup) implementations
    /// and method-level directives are keyed by.
    pub fn declared_by(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }

    /// Declares an interface implemented by the target type.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Appends the next positional argument.
    pub fn arg(mut self, value: impl Loggable) -> Self {
        self.args.push(value.to_log_value());
        self
    }

    /// Concrete type receiving the call.
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// Module (application) name.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Invoked signature.
    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Interfaces implemented by the target type, in declaration order.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    /// Positional arguments.
    pub fn args(&self) -> &[LogValue] {
        &self.args
    }

    /// Type declaring the invoked method: the target type unless inherited.
    pub fn declaring_type(&self) -> &str {
        self.declaring_type.as_deref().unwrap_or(&self.target_type)
    }

    /// Identity of the invoked method.
    pub fn method_id(&self) -> MethodId {
        self.signature.method_id(self.declaring_type())
    }

    /// Fully qualified signature, e.g.
    /// `shop::PaymentService::charge(amount: i64, card_number: String) -> bool`.
    pub fn namespace(&self) -> String {
        let params: Vec<String> = self
            .signature
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.type_name))
            .collect();
        let mut rendered = format!(
            "{}::{}({})",
            self.target_type,
            self.signature.name,
            params.join(", ")
        );
        if let Some(ret) = &self.signature.return_type {
            rendered.push_str(" -> ");
            rendered.push_str(ret);
        }
        rendered
    }
}

/// Renders the arguments of `call` as `name=value, name=value`.
///
/// Each argument is masked by its parameter's rule. Parameters without an
/// argument render as `null`; surplus arguments are named `argN` by position.
pub fn format_arguments(formatter: &ValueFormatter, call: &CallDescriptor) -> String {
    let params = call.signature.parameters();
    let count = params.len().max(call.args.len());

    (0..count)
        .map(|i| {
            let param = params.get(i);
            let value = call.args.get(i).unwrap_or(&LogValue::Null);
            let rendered = formatter.format_for_log(value, param.and_then(Parameter::mask));
            match param {
                Some(param) => format!("{}={}", param.name, rendered),
                None => format!("arg{i}={rendered}"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charge_signature() -> MethodSignature {
        MethodSignature::new("charge")
            .param(Parameter::new("amount", "i64"))
            .param(Parameter::new("card_number", "String").masked(MaskRule::new(0, 12).unwrap()))
            .returns("bool")
    }

    #[test]
    fn test_namespace() {
        let call = CallDescriptor::new("shop::PaymentService", charge_signature());
        assert_eq!(
            call.namespace(),
            "shop::PaymentService::charge(amount: i64, card_number: String) -> bool"
        );
        assert_eq!(call.module(), "shop");
    }

    #[test]
    fn test_namespace_without_return_type() {
        let call = CallDescriptor::new("Jobs", MethodSignature::new("run"));
        assert_eq!(call.namespace(), "Jobs::run()");
        assert_eq!(call.module(), "Jobs");
    }

    #[test]
    fn test_method_ids_distinguish_overloads() {
        let a = MethodSignature::new("find").param(Parameter::new("id", "u64"));
        let b = MethodSignature::new("find").param(Parameter::new("name", "String"));
        assert_ne!(a.method_id("Repo"), b.method_id("Repo"));
        assert_eq!(a.method_id("Repo").to_string(), "Repo::find(u64)");
        assert_eq!(
            a.method_id("Repo").on_type("IRepo"),
            a.method_id("IRepo")
        );
    }

    #[test]
    fn test_inherited_method_identity() {
        let call = CallDescriptor::new("web::UserController", MethodSignature::new("ok"))
            .declared_by("web::ControllerBase");
        assert_eq!(call.declaring_type(), "web::ControllerBase");
        assert_eq!(call.method_id().declaring_type(), "web::ControllerBase");
        assert_eq!(call.target_type(), "web::UserController");
    }

    #[test]
    fn test_format_arguments_masks() {
        let call = CallDescriptor::new("shop::PaymentService", charge_signature())
            .arg(100)
            .arg("4111111111111111");
        let rendered = format_arguments(&ValueFormatter::new(), &call);
        assert_eq!(rendered, "amount=100, card_number=************1111");
    }

    #[test]
    fn test_format_arguments_mismatched_counts() {
        let call = CallDescriptor::new("shop::PaymentService", charge_signature()).arg(5);
        assert_eq!(
            format_arguments(&ValueFormatter::new(), &call),
            "amount=5, card_number=null"
        );

        let call = CallDescriptor::new("Jobs", MethodSignature::new("run"))
            .arg(true)
            .arg("x");
        assert_eq!(
            format_arguments(&ValueFormatter::new(), &call),
            "arg0=true, arg1=x"
        );
    }

    #[test]
    fn test_format_arguments_empty() {
        let call = CallDescriptor::new("Jobs", MethodSignature::new("run"));
        assert_eq!(format_arguments(&ValueFormatter::new(), &call), "");
    }
}
