use crate::infra::{
    build_service, sample_companies, sample_students, service_from_roster,
    InMemoryEligibilityService,
};
use chrono::SecondsFormat;
use clap::Args;
use placement_policy::config::AppConfig;
use placement_policy::eligibility::{
    CompanyId, EligibilityBatch, EligibilityResult, PolicyConfig, StudentId,
};
use placement_policy::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Student to evaluate
    #[arg(long)]
    pub(crate) student_id: u64,
    /// Company the student wants to apply to
    #[arg(long)]
    pub(crate) company_id: String,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EligibleArgs {
    /// Company to project the eligible population for
    #[arg(long)]
    pub(crate) company_id: String,
    /// Print the batch as JSON instead of a listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PoliciesArgs {
    /// Print the bundled defaults rather than the loaded configuration
    #[arg(long)]
    pub(crate) defaults: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Show every policy verdict behind each decision
    #[arg(long)]
    pub(crate) show_verdicts: bool,
}

fn configured_service() -> Result<std::sync::Arc<InMemoryEligibilityService>, AppError> {
    let config = AppConfig::load()?;
    build_service(&config.roster)
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let service = configured_service()?;
    let result = service.decide(StudentId(args.student_id), &CompanyId(args.company_id))?;

    if args.json {
        print_json(&result);
    } else {
        render_result(&result, true);
    }
    Ok(())
}

pub(crate) fn run_eligible(args: EligibleArgs) -> Result<(), AppError> {
    let service = configured_service()?;
    let batch = service.eligible_students(&CompanyId(args.company_id))?;

    if args.json {
        print_json(&batch);
    } else {
        render_batch(&batch);
    }
    Ok(())
}

pub(crate) fn run_policies(args: PoliciesArgs) -> Result<(), AppError> {
    let config = if args.defaults {
        PolicyConfig::standard()
    } else {
        configured_service()?.policy_config()?
    };
    print_json(&config);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { show_verdicts } = args;
    let service = service_from_roster(sample_students(), sample_companies());

    println!("Placement policy demo");
    println!(
        "Roster: {} students, {} companies",
        service.students()?.len(),
        service.companies()?.len()
    );

    println!("\n1. Dream offer outranks the CGPA threshold");
    let result = service.decide(StudentId(102), &company("initech"))?;
    render_result(&result, show_verdicts);

    println!("\n2. L2 students need the configured salary hike");
    let result = service.decide(StudentId(103), &company("initech"))?;
    render_result(&result, show_verdicts);
    let result = service.decide(StudentId(103), &company("pied-piper"))?;
    render_result(&result, show_verdicts);

    println!("\n3. Dream company lifts the L1 block");
    let result = service.decide(StudentId(104), &company("umbrella"))?;
    render_result(&result, show_verdicts);

    println!("\n4. Maximum companies reached");
    let result = service.decide(StudentId(105), &company("hooli"))?;
    render_result(&result, show_verdicts);

    println!("\n5. Eligible students for Hooli under the default policies");
    let batch = service.eligible_students(&company("hooli"))?;
    render_batch(&batch);

    println!("\n6. Campus placement target of 80% switched on");
    let mut config = service.policy_config()?;
    config.placement_percentage.enabled = true;
    config.placement_percentage.target_percentage = 80.0;
    service.update_policy_config(config)?;
    let batch = service.eligible_students(&company("hooli"))?;
    render_batch(&batch);

    println!("\n7. Invalid configurations are rejected and the active one is kept");
    let mut invalid = service.policy_config()?;
    invalid.offer_category.l1_threshold_amount = 500_000.0;
    match service.update_policy_config(invalid) {
        Ok(_) => println!("  Unexpectedly accepted inverted tier thresholds"),
        Err(err) => println!("  Rejected: {}", err),
    }
    let active = service.policy_config()?;
    println!(
        "  Active L1 threshold remains {:.2}",
        active.offer_category.l1_threshold_amount
    );

    Ok(())
}

fn company(id: &str) -> CompanyId {
    CompanyId(id.to_string())
}

fn render_result(result: &EligibilityResult, show_verdicts: bool) {
    let outcome = if result.is_eligible {
        "ELIGIBLE"
    } else {
        "NOT ELIGIBLE"
    };
    println!(
        "  {} (student {}) -> {} ({}): {}",
        result.student_name, result.student_id, result.company_name, result.company_id, outcome
    );
    for reason in &result.reasons {
        println!("    - {}", reason);
    }
    if let Some(specifics) = &result.policy_specifics {
        println!("    Offer category detail: {}", specifics);
    }

    if show_verdicts {
        for verdict in result.verdicts.iter().filter(|verdict| verdict.applies) {
            let effect = if verdict.overrides {
                "overrides"
            } else if verdict.blocks {
                "blocks"
            } else {
                "passes"
            };
            println!("    [{}] {}", verdict.kind.label(), effect);
        }
    }
}

fn render_batch(batch: &EligibilityBatch) {
    println!(
        "  {} ({}) offering {:.2}",
        batch.company.name, batch.company.id, batch.company.offered_salary
    );
    println!(
        "  Placement snapshot: {}/{} placed ({:.2}%) at {}",
        batch.placement.placed,
        batch.placement.total,
        batch.placement.percentage(),
        batch.evaluated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    if batch.students.is_empty() {
        println!("  No eligible students");
        return;
    }
    for student in &batch.students {
        let status = if student.is_placed {
            "placed"
        } else {
            "unplaced"
        };
        println!(
            "  - {} {} (cgpa {:.2}, {})",
            student.id, student.name, student.cgpa, status
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("failed to render JSON output: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_scenarios_hold_on_the_sample_roster() {
        let service = service_from_roster(sample_students(), sample_companies());

        let dream_offer = service
            .decide(StudentId(102), &company("initech"))
            .expect("decision");
        assert!(dream_offer.is_eligible);

        let short_hike = service
            .decide(StudentId(103), &company("initech"))
            .expect("decision");
        assert!(!short_hike.is_eligible);
        assert!(short_hike.policy_specifics.is_some());

        let exact_hike = service
            .decide(StudentId(103), &company("pied-piper"))
            .expect("decision");
        assert!(exact_hike.is_eligible);

        let dream_company = service
            .decide(StudentId(104), &company("umbrella"))
            .expect("decision");
        assert!(dream_company.is_eligible);

        let capped = service
            .decide(StudentId(105), &company("hooli"))
            .expect("decision");
        assert!(!capped.is_eligible);
    }

    #[test]
    fn placement_target_narrows_the_batch_to_unplaced_students() {
        let service = service_from_roster(sample_students(), sample_companies());

        let before = service
            .eligible_students(&company("hooli"))
            .expect("projection");
        let before_ids: Vec<u64> = before.students.iter().map(|student| student.id.0).collect();
        assert_eq!(before_ids, vec![101, 102, 106]);

        let mut config = service.policy_config().expect("config");
        config.placement_percentage.enabled = true;
        config.placement_percentage.target_percentage = 80.0;
        service.update_policy_config(config).expect("valid config");

        let after = service
            .eligible_students(&company("hooli"))
            .expect("projection");
        let after_ids: Vec<u64> = after.students.iter().map(|student| student.id.0).collect();
        assert_eq!(after_ids, vec![101, 106]);
    }

    #[test]
    fn demo_runs_to_completion() {
        run_demo(DemoArgs {
            show_verdicts: true,
        })
        .expect("demo completes");
    }
}
