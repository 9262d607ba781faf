// ABOUTME: Property tests for step planning.
// ABOUTME: Every valid function name yields the fixed single-function sequences.

use openfaas_deploy::deploy::{DeploymentRequest, Tools};
use openfaas_deploy::process::StepKind;
use openfaas_deploy::types::FunctionName;
use proptest::prelude::*;

fn function_name() -> impl Strategy<Value = FunctionName> {
    "[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?".prop_map(|s| FunctionName::new(&s).unwrap())
}

proptest! {
    #[test]
    fn single_function_deploy_is_one_filtered_step(name in function_name()) {
        let plan = Tools::default()
            .plan(&DeploymentRequest::single_function(name.clone(), false))
            .unwrap();

        prop_assert_eq!(plan.len(), 1);
        prop_assert_eq!(plan.head.kind, StepKind::Deploy);
        prop_assert_eq!(
            &plan.head.args,
            &vec![
                "deploy".to_string(),
                "-f".to_string(),
                "./serverless.yml".to_string(),
                "--filter".to_string(),
                name.to_string(),
            ]
        );
    }

    #[test]
    fn single_function_push_precedes_deploy(name in function_name()) {
        let plan = Tools::default()
            .plan(&DeploymentRequest::single_function(name.clone(), true))
            .unwrap();

        let kinds: Vec<_> = plan.iter().map(|s| s.kind).collect();
        prop_assert_eq!(kinds, vec![StepKind::Push, StepKind::Deploy]);
        for step in plan.iter() {
            prop_assert_eq!(step.args.last(), Some(&name.to_string()));
            prop_assert!(!step.args.iter().any(|a| a == "-lable"));
        }
    }

    #[test]
    fn scale_zero_label_only_on_deploy(label in "[a-z.]{1,20}=(true|false)") {
        let plan = Tools::default()
            .plan(&DeploymentRequest::push_and_scale_zero(label.clone()))
            .unwrap();

        for step in plan.iter() {
            let labelled = step.args.windows(2).any(|w| w[0] == "-lable" && w[1] == label);
            prop_assert_eq!(labelled, step.kind == StepKind::Deploy);
        }
    }
}
