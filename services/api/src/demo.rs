use crate::infra::{read_form, InMemoryDraftRepository, LoggingSubmissionPublisher};
use clap::Args;
use dfsa_wizard::config::AppConfig;
use dfsa_wizard::error::AppError;
use dfsa_wizard::workflows::fs_application::{
    calculate_fees, ActivityCode, EndorsementCode, FeeCalculation, FinancialServiceCode,
    FormAction, FormDataPatch, FsApplicationFormData, FsApplicationService, InvestmentType,
    StepDefinition, StepId, VisibilityEngine, FEE_CURRENCY,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct FormFileArgs {
    /// Saved wizard form (JSON, camelCase keys as sent by the wizard shell)
    pub(crate) form: PathBuf,
    /// Print machine-readable JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Apply as a representative office instead of a broker-dealer
    #[arg(long)]
    pub(crate) representative_office: bool,
    /// Stop before submitting the application
    #[arg(long)]
    pub(crate) skip_submit: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepListing {
    step: StepDefinition,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    hidden_fields: Vec<String>,
}

pub(crate) fn run_fee_quote(args: FormFileArgs) -> Result<(), AppError> {
    let form = read_form(&args.form)?;
    let fees = calculate_fees(&form);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fees)?);
    } else {
        render_fees(&fees);
    }
    Ok(())
}

pub(crate) fn run_step_listing(args: FormFileArgs) -> Result<(), AppError> {
    let form = read_form(&args.form)?;
    let engine = AppConfig::load()?.drafts.visibility_engine()?;
    let listing = step_listing(&engine, &form);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        render_steps(&listing);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let publisher = Arc::new(LoggingSubmissionPublisher::default());
    let service = FsApplicationService::new(
        Arc::new(InMemoryDraftRepository::default()),
        publisher.clone(),
    );

    println!("DFSA application wizard demo");
    let draft = service.create_draft(Some(FormDataPatch {
        firm_name: Some("Gulf Meridian Capital Ltd".to_string()),
        submitter_name: Some("Layla Haddad".to_string()),
        submitter_email: Some("licensing@gulfmeridian.ae".to_string()),
        ..FormDataPatch::default()
    }))?;
    let id = draft.id.clone();
    println!("- created draft {id}");

    for action in demo_actions(args.representative_office) {
        let name = action.name();
        service.apply(&id, action)?;
        println!("  applied {name}");
    }

    let view = service.view(&id)?;
    println!("\nVisible steps ({})", view.visible_steps.len());
    for step in &view.visible_steps {
        println!("  - {} {}", step.id.id(), step.name);
    }
    println!();
    render_fees(&view.fees);

    for step in &view.visible_steps {
        service.mark_step_complete(&id, step.id)?;
    }
    let view = service.view(&id)?;
    println!("\nProgress: {}%", view.progress_percent);

    if args.skip_submit {
        println!("Submission skipped; draft {id} left open");
        return Ok(());
    }

    let submitted = service.submit(&id)?;
    println!(
        "Submitted {} for {} ({} {} due now)",
        submitted.reference, submitted.firm_name, submitted.fees.total_fee, submitted.fees.currency
    );
    println!("Applications queued: {}", publisher.submissions().len());
    Ok(())
}

fn demo_actions(representative_office: bool) -> Vec<FormAction> {
    let mut actions = if representative_office {
        vec![FormAction::SetRepresentativeOffice { enabled: true }]
    } else {
        vec![
            FormAction::ToggleActivity {
                activity: ActivityCode::A1,
                selected: true,
            },
            FormAction::ToggleMatrixCell {
                service: FinancialServiceCode::FS1,
                investment: InvestmentType::IT1,
                selected: true,
            },
            FormAction::ToggleMatrixCell {
                service: FinancialServiceCode::FS5,
                investment: InvestmentType::IT2,
                selected: true,
            },
            FormAction::ToggleEndorsement {
                endorsement: EndorsementCode::IslamicFinance,
                selected: true,
            },
        ]
    };

    actions.extend([
        FormAction::AddDeclaration {
            person_name: "Layla Haddad".to_string(),
            role: "senior_executive".to_string(),
        },
        FormAction::SignDeclaration {
            index: 0,
            signed: true,
        },
        FormAction::Patch(Box::new(FormDataPatch {
            submission_declaration: Some(true),
            ..FormDataPatch::default()
        })),
    ]);
    actions
}

fn step_listing(engine: &VisibilityEngine, form: &FsApplicationFormData) -> Vec<StepListing> {
    let steps = engine.visible_steps(form);
    let mut hidden = engine.hidden_fields(&steps, form);
    steps
        .into_iter()
        .map(|step| StepListing {
            step: StepId::definition(step),
            hidden_fields: hidden.remove(&step).unwrap_or_default(),
        })
        .collect()
}

fn render_fees(fees: &FeeCalculation) {
    println!("Fee quote ({})", fees.tier.label());
    println!("- application fee: {} {FEE_CURRENCY}", fees.application_fee);
    for line in &fees.endorsements {
        println!("- {} surcharge: {} {FEE_CURRENCY}", line.label, line.amount);
    }
    println!("- due with application: {} {FEE_CURRENCY}", fees.total_fee);
    println!("- annual fee: {} {FEE_CURRENCY}", fees.annual_fee);
}

fn render_steps(listing: &[StepListing]) {
    let mut stage = None;
    for entry in listing {
        if stage != Some(entry.step.stage) {
            stage = Some(entry.step.stage);
            println!("{}", entry.step.stage.label());
        }
        println!("  - {} {}", entry.step.id.id(), entry.step.name);
        if !entry.hidden_fields.is_empty() {
            println!("      hidden: {}", entry.hidden_fields.join(", "));
        }
    }
}
