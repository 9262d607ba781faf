// ABOUTME: The deployment request built from CLI input.
// ABOUTME: Immutable once constructed; each mode maps to one fixed step sequence.

use crate::types::FunctionName;

use super::error::DeployError;

/// What the user asked the orchestrator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    /// Deploy the whole stack directly, without packaging or pushing.
    Full,
    /// Package, push, then deploy the whole stack.
    Push,
    /// Package, push, then deploy with the scale-to-zero label.
    PushAndScaleZero,
    /// Deploy one function, optionally pushing its image first.
    SingleFunction,
    /// List deployed functions.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    mode: DeployMode,
    function_filter: Option<FunctionName>,
    label: Option<String>,
    also_push: bool,
}

impl DeploymentRequest {
    /// Build a request from its parts, rejecting combinations that cannot be planned.
    pub fn new(
        mode: DeployMode,
        function_filter: Option<FunctionName>,
        label: Option<String>,
        also_push: bool,
    ) -> Result<Self, DeployError> {
        let single = mode == DeployMode::SingleFunction;
        let scale_zero = mode == DeployMode::PushAndScaleZero;

        if single && function_filter.is_none() {
            return Err(DeployError::MissingFunctionName);
        }
        if !single && function_filter.is_some() {
            return Err(invalid("only a single-function deployment takes a function name"));
        }
        if scale_zero && label.as_deref().is_none_or(str::is_empty) {
            return Err(invalid("push-and-scale-zero requires a label"));
        }
        if !scale_zero && label.is_some() {
            return Err(invalid("only push-and-scale-zero deploys with a label"));
        }
        if !single && also_push {
            return Err(invalid("only a single-function deployment can also push"));
        }

        Ok(Self {
            mode,
            function_filter,
            label,
            also_push,
        })
    }

    pub fn full() -> Self {
        Self {
            mode: DeployMode::Full,
            function_filter: None,
            label: None,
            also_push: false,
        }
    }

    pub fn push() -> Self {
        Self {
            mode: DeployMode::Push,
            ..Self::full()
        }
    }

    pub fn push_and_scale_zero(label: impl Into<String>) -> Self {
        Self {
            mode: DeployMode::PushAndScaleZero,
            label: Some(label.into()),
            ..Self::full()
        }
    }

    pub fn single_function(name: FunctionName, also_push: bool) -> Self {
        Self {
            mode: DeployMode::SingleFunction,
            function_filter: Some(name),
            also_push,
            ..Self::full()
        }
    }

    pub fn list() -> Self {
        Self {
            mode: DeployMode::List,
            ..Self::full()
        }
    }

    pub fn mode(&self) -> DeployMode {
        self.mode
    }

    pub fn function_filter(&self) -> Option<&FunctionName> {
        self.function_filter.as_ref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether a single-function deployment pushes the image first.
    pub fn also_push(&self) -> bool {
        self.also_push
    }
}

fn invalid(reason: &str) -> DeployError {
    DeployError::InvalidRequest(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: &str = "com.openfaas.scale.zero=true";

    fn figlet() -> FunctionName {
        FunctionName::new("figlet").unwrap()
    }

    fn assert_invalid(result: Result<DeploymentRequest, DeployError>) {
        let err = result.unwrap_err();
        assert!(
            matches!(err, DeployError::InvalidRequest(_)),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn single_function_requires_name() {
        let err = DeploymentRequest::new(DeployMode::SingleFunction, None, None, true).unwrap_err();
        assert!(matches!(err, DeployError::MissingFunctionName));
    }

    #[test]
    fn new_accepts_valid_parts() {
        let name = figlet();
        let request =
            DeploymentRequest::new(DeployMode::SingleFunction, Some(name.clone()), None, true)
                .unwrap();
        assert_eq!(request, DeploymentRequest::single_function(name, true));
    }

    #[test]
    fn new_accepts_scale_zero_with_label() {
        let request =
            DeploymentRequest::new(DeployMode::PushAndScaleZero, None, Some(LABEL.into()), false)
                .unwrap();
        assert_eq!(request, DeploymentRequest::push_and_scale_zero(LABEL));
    }

    #[test]
    fn scale_zero_requires_label() {
        assert_invalid(DeploymentRequest::new(
            DeployMode::PushAndScaleZero,
            None,
            None,
            false,
        ));
        assert_invalid(DeploymentRequest::new(
            DeployMode::PushAndScaleZero,
            None,
            Some(String::new()),
            false,
        ));
    }

    #[test]
    fn label_only_with_scale_zero() {
        for mode in [DeployMode::Full, DeployMode::Push, DeployMode::List] {
            assert_invalid(DeploymentRequest::new(mode, None, Some(LABEL.into()), false));
        }
        assert_invalid(DeploymentRequest::new(
            DeployMode::SingleFunction,
            Some(figlet()),
            Some(LABEL.into()),
            false,
        ));
    }

    #[test]
    fn also_push_only_with_single_function() {
        for mode in [DeployMode::Full, DeployMode::Push, DeployMode::List] {
            assert_invalid(DeploymentRequest::new(mode, None, None, true));
        }
        assert_invalid(DeploymentRequest::new(
            DeployMode::PushAndScaleZero,
            None,
            Some(LABEL.into()),
            true,
        ));
    }

    #[test]
    fn function_name_only_with_single_function() {
        for mode in [DeployMode::Full, DeployMode::Push, DeployMode::List] {
            assert_invalid(DeploymentRequest::new(mode, Some(figlet()), None, false));
        }
        assert_invalid(DeploymentRequest::new(
            DeployMode::PushAndScaleZero,
            Some(figlet()),
            Some(LABEL.into()),
            false,
        ));
    }

    #[test]
    fn scale_zero_request_carries_label() {
        let request = DeploymentRequest::push_and_scale_zero(LABEL);
        assert_eq!(request.mode(), DeployMode::PushAndScaleZero);
        assert_eq!(request.label(), Some(LABEL));
        assert!(request.function_filter().is_none());
    }

    #[test]
    fn plain_requests_have_no_label() {
        for request in [
            DeploymentRequest::full(),
            DeploymentRequest::push(),
            DeploymentRequest::list(),
        ] {
            assert!(request.label().is_none());
            assert!(!request.also_push());
        }
    }
}
