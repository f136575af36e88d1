use campus_housing::config::HousingConfig;
use campus_housing::error::AppError;
use campus_housing::housing::{
    HousingPolicy, HousingRegistry, ReassignPolicy, RentSchedule, Residence, ResidenceId,
    StudentId,
};
use clap::{Args, Subcommand};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave requests submitted when an employee is assigned.
    #[arg(long)]
    pub(crate) no_auto_advance: bool,
    /// Keep a student's previous residence marked occupied on reassignment.
    #[arg(long)]
    pub(crate) keep_previous_residence: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RentArgs {
    #[command(subcommand)]
    pub(crate) residence: RentResidence,
}

#[derive(Subcommand, Debug)]
pub(crate) enum RentResidence {
    /// Dorm room priced by square footage
    Dorm {
        #[arg(long, allow_negative_numbers = true)]
        size: i64,
    },
    /// Apartment priced by bedroom count
    Apartment {
        #[arg(long, allow_negative_numbers = true)]
        bedrooms: i64,
    },
}

pub(crate) fn run_demo(args: DemoArgs, housing: &HousingConfig) -> Result<(), AppError> {
    for line in demo_transcript(policy_for(&args, housing))? {
        println!("{line}");
    }
    Ok(())
}

/// Configured policy with the demo's command line overrides applied.
pub(crate) fn policy_for(args: &DemoArgs, housing: &HousingConfig) -> HousingPolicy {
    let mut policy = housing.policy();
    if args.no_auto_advance {
        policy.auto_advance_on_assign = false;
    }
    if args.keep_previous_residence {
        policy.reassignment = ReassignPolicy::KeepPrevious;
    }
    policy
}

/// Two rent lines followed by a pretty JSON dump of each maintenance request.
pub(crate) fn demo_transcript(policy: HousingPolicy) -> Result<Vec<String>, AppError> {
    let mut registry = HousingRegistry::new(policy);
    let mut lines = Vec::new();

    let dorm = registry.add_dorm_room("Dorm A", "123 University St", 200)?;
    let apartment = registry.add_apartment("Apartment B", "456 College Ave", 3)?;

    let alice = registry.enroll_student("Alice", "S1001", "Female")?;
    let bob = registry.enroll_student("Bob", "S1002", "Male")?;

    registry.assign_residence(&alice, &dorm)?;
    registry.assign_residence(&bob, &apartment)?;

    for student in [&alice, &bob] {
        lines.push(rent_line(&registry, student)?);
    }

    let faucet = registry.submit_request("Leaky faucet", &alice)?;
    let window = registry.submit_request("Broken window", &bob)?;

    registry.assign_employee(&faucet, "Maintenance Guy")?;
    registry.update_request_status_label(&faucet, "in progress")?;

    for request in [&faucet, &window] {
        let view = registry.request_view(request)?;
        lines.push(serde_json::to_string_pretty(&view)?);
    }

    Ok(lines)
}

fn rent_line(registry: &HousingRegistry, student: &StudentId) -> Result<String, AppError> {
    let rent = registry.rent_for(student)?;
    let name = registry
        .student(student)
        .map(|record| record.name())
        .unwrap_or(student.0.as_str());
    Ok(format!("{name}'s rent is ${rent}"))
}

pub(crate) fn run_rent_quote(args: RentArgs, housing: &HousingConfig) -> Result<(), AppError> {
    println!("{}", rent_quote(&args.residence, &housing.policy().rent)?);
    Ok(())
}

pub(crate) fn rent_quote(
    residence: &RentResidence,
    schedule: &RentSchedule,
) -> Result<String, AppError> {
    let quote_id = ResidenceId("quote".to_string());
    let residence = match *residence {
        RentResidence::Dorm { size } => Residence::dorm_room(quote_id, "Quote", "n/a", size)?,
        RentResidence::Apartment { bedrooms } => {
            Residence::apartment(quote_id, "Quote", "n/a", bedrooms)?
        }
    };

    Ok(format!(
        "{} rent is ${}",
        residence.kind().label(),
        residence.rent_under(schedule)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_housing::housing::HousingError;

    #[test]
    fn flags_override_configured_policy() {
        let housing = HousingConfig::default();

        let policy = policy_for(&DemoArgs::default(), &housing);
        assert!(policy.auto_advance_on_assign);
        assert_eq!(policy.reassignment, ReassignPolicy::VacatePrevious);

        let args = DemoArgs {
            no_auto_advance: true,
            keep_previous_residence: true,
        };
        let policy = policy_for(&args, &housing);
        assert!(!policy.auto_advance_on_assign);
        assert_eq!(policy.reassignment, ReassignPolicy::KeepPrevious);
        assert_eq!(policy.rent, housing.policy().rent);
    }

    #[test]
    fn transcript_lists_rent_then_requests() {
        let lines = demo_transcript(HousingPolicy::default()).expect("demo runs");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Alice's rent is $2000");
        assert_eq!(lines[1], "Bob's rent is $900");

        let faucet: serde_json::Value = serde_json::from_str(&lines[2]).expect("json dump");
        assert_eq!(faucet["description"], "Leaky faucet");
        assert_eq!(faucet["status"], "in progress");
        assert_eq!(faucet["assigned_employee"], "Maintenance Guy");

        let window: serde_json::Value = serde_json::from_str(&lines[3]).expect("json dump");
        assert_eq!(window["status"], "submitted");
        assert!(window["assigned_employee"].is_null());
    }

    #[test]
    fn transcript_matches_without_auto_advance() {
        let housing = HousingConfig::default();
        let args = DemoArgs {
            no_auto_advance: true,
            keep_previous_residence: false,
        };
        let lines = demo_transcript(policy_for(&args, &housing)).expect("demo runs");
        assert_eq!(
            lines,
            demo_transcript(HousingPolicy::default()).expect("demo runs")
        );
    }

    #[test]
    fn rent_quote_formats_both_residence_kinds() {
        let schedule = RentSchedule::default();
        assert_eq!(
            rent_quote(&RentResidence::Dorm { size: 200 }, &schedule).expect("quote"),
            "Dorm Room rent is $2000"
        );
        assert_eq!(
            rent_quote(&RentResidence::Apartment { bedrooms: 3 }, &schedule).expect("quote"),
            "Apartment rent is $900"
        );
    }

    #[test]
    fn rent_quote_rejects_invalid_input() {
        let schedule = RentSchedule::default();
        match rent_quote(&RentResidence::Dorm { size: -5 }, &schedule) {
            Err(AppError::Housing(HousingError::InvalidArgument { field, .. })) => {
                assert_eq!(field, "size")
            }
            other => panic!("expected invalid size, got {other:?}"),
        }

        let oversized = RentSchedule {
            dorm_rate_per_sq_ft: u64::MAX,
            apartment_rate_per_bedroom: 300,
        };
        match rent_quote(&RentResidence::Dorm { size: 2 }, &oversized) {
            Err(AppError::Housing(HousingError::InvalidArgument { field, .. })) => {
                assert_eq!(field, "rent")
            }
            other => panic!("expected rent overflow, got {other:?}"),
        }
    }
}
