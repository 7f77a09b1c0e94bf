//! Compile and display entitlements for a profile

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use verdant_core::{Entitlements, all_capabilities};

use super::ProfileArgs;

#[derive(Debug, Args)]
pub struct ComputeArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Print the compiled entitlements as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ComputeArgs) -> Result<()> {
    let ent = args.profile.compile();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ent)?);
        return Ok(());
    }

    print_summary(&ent);
    println!("{}", capability_table(&ent));
    Ok(())
}

fn print_summary(ent: &Entitlements) {
    println!("Plan:           {}", ent.plan());
    if ent.mode_downgraded() {
        println!(
            "Mode:           {} (requested {}, not covered by plan)",
            ent.mode(),
            ent.requested_mode()
        );
    } else {
        println!("Mode:           {}", ent.mode());
    }
    println!("App role:       {}", ent.app_role());
    match ent.facility_role() {
        Some(role) => println!("Facility role:  {}", role),
        None => println!("Facility role:  -"),
    }

    let limits = ent.limits();
    println!("Paid courses:   {}", limits.max_paid_courses);
    println!("Lessons/course: {}", limits.max_lessons_per_course);
    println!("Active grows:   {}", limits.max_active_grows);
}

fn capability_table(ent: &Entitlements) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Capability").fg(Color::Cyan),
        Cell::new("Allowed").fg(Color::Cyan),
    ]);

    for capability in all_capabilities() {
        let allowed = ent.can(*capability);
        let cell = if allowed {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![Cell::new(capability.as_str()), cell]);
    }

    table
}
