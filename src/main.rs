use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use std::time::Duration;

use traffic_watch::simulation::{Dashboard, IncidentGenerator, MapOverlay, MapProjection, RegisterConfig};

/// Half-width in degrees of the area simulated incidents are placed in
const MAP_INCIDENT_RADIUS_DEG: f64 = 0.015;

#[derive(Parser)]
#[command(name = "traffic_watch")]
#[command(about = "Traffic dashboard with simulated incidents and optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of display frames to run in headless mode
    #[arg(long, default_value = "1800")]
    frames: u32,

    /// Display refresh rate used in headless mode
    #[arg(long, default_value = "60")]
    fps: f32,

    /// Seed for reproducible incident generation
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate an incident every N seconds in headless mode (0 disables)
    #[arg(long, default_value = "7")]
    incident_every: f32,

    /// Acknowledge an alert at these times (seconds) in headless mode
    #[arg(long)]
    alert_at: Vec<f32>,

    /// Print a summary every N seconds in headless mode
    #[arg(long, default_value = "5")]
    report_every: f32,

    /// Seconds each incident stays on the register
    #[arg(long, default_value = "20")]
    ttl: f32,

    /// Seconds the alert override stays up
    #[arg(long, default_value = "3")]
    alert_duration: f32,

    /// Enable the map overlay
    #[arg(long)]
    map: bool,
}

impl Cli {
    fn register_config(&self) -> Result<RegisterConfig> {
        ensure!(self.ttl > 0.0, "--ttl must be positive, got {}", self.ttl);
        ensure!(
            self.alert_duration > 0.0,
            "--alert-duration must be positive, got {}",
            self.alert_duration
        );
        Ok(RegisterConfig {
            incident_ttl: seconds(self.ttl, "--ttl")?,
            alert_duration: seconds(self.alert_duration, "--alert-duration")?,
        })
    }

    fn build_dashboard(&self) -> Result<(Dashboard, IncidentGenerator)> {
        let mut dashboard = Dashboard::create_demo(self.register_config()?)?;
        let mut generator = match self.seed {
            Some(seed) => IncidentGenerator::new_with_seed(seed),
            None => IncidentGenerator::new(),
        };
        if self.map {
            let projection = MapProjection::default();
            generator = generator.with_area(projection.center, MAP_INCIDENT_RADIUS_DEG)?;
            dashboard = dashboard.with_overlay(MapOverlay::new(projection));
        }
        Ok((dashboard, generator))
    }
}

/// Convert a seconds flag, rejecting values a `Duration` cannot hold
fn seconds(value: f32, flag: &str) -> Result<Duration> {
    Duration::try_from_secs_f32(value)
        .with_context(|| format!("{} out of range: {}", flag, value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.ui {
        run_ui(&cli)
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        run_headless(&cli)
    }
}

/// Run the dashboard in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    ensure!(cli.fps > 0.0, "--fps must be positive, got {}", cli.fps);
    ensure!(cli.incident_every >= 0.0, "--incident-every must not be negative");
    ensure!(cli.report_every > 0.0, "--report-every must be positive");

    let (mut dashboard, mut generator) = cli.build_dashboard()?;
    let frame_delta = seconds(1.0 / cli.fps, "--fps")?;
    let report_every = seconds(cli.report_every, "--report-every")?;

    let incident_every = if cli.incident_every > 0.0 {
        Some(seconds(cli.incident_every, "--incident-every")?)
    } else {
        None
    };
    let mut next_incident = incident_every.map(|_| Duration::ZERO);

    let mut alerts = cli
        .alert_at
        .iter()
        .filter(|t| **t >= 0.0)
        .map(|t| seconds(*t, "--alert-at"))
        .collect::<Result<Vec<_>>>()?;
    alerts.sort();
    let mut alerts = alerts.into_iter().peekable();

    println!("Running traffic dashboard in headless mode...");
    println!("Frames: {}, Frame time: {:.4}s", cli.frames, frame_delta.as_secs_f32());
    println!(
        "Incident TTL: {:.1}s, Alert duration: {:.1}s, Map overlay: {}",
        cli.ttl,
        cli.alert_duration,
        if cli.map { "on" } else { "off" }
    );
    println!();

    println!("Initial state:");
    dashboard.print_summary();
    dashboard.draw_map();
    println!();

    let mut recorded = 0usize;
    let mut alerts_sent = 0usize;
    let mut next_report = report_every;

    for frame in 1..=cli.frames {
        let now = dashboard.register.now();

        if let (Some(every), Some(at)) = (incident_every, next_incident) {
            if now >= at {
                let incident = dashboard.simulate_incident(&mut generator);
                info!("Simulated incident {}: {}", incident.id, incident.summary());
                recorded += 1;
                next_incident = Some(at.saturating_add(every));
            }
        }

        while alerts.next_if(|at| now >= *at).is_some() {
            dashboard.acknowledge_alert();
            alerts_sent += 1;
        }

        dashboard.frame(frame_delta);

        if dashboard.register.now() >= next_report || frame == cli.frames {
            println!(
                "--- After frame {} ({:.1}s simulated time) ---",
                frame,
                dashboard.register.now().as_secs_f32()
            );
            dashboard.print_summary();
            dashboard.draw_map();
            println!();
            next_report = next_report.saturating_add(report_every);
        }
    }

    let remaining = dashboard.register.len();
    info!("=== DASHBOARD RUN COMPLETE ===");
    info!("Simulated time: {:.2}s", dashboard.register.now().as_secs_f32());
    info!("Frames rendered: {}", dashboard.scene.frames);
    info!("Total incidents recorded: {}", recorded);
    info!("Incidents expired: {}", recorded - remaining);
    info!("Active incidents: {}", remaining);
    info!("Alerts acknowledged: {}", alerts_sent);
    info!("Final status: {}", dashboard.status());
    Ok(())
}

#[cfg(feature = "ui")]
fn run_ui(cli: &Cli) -> Result<()> {
    let (dashboard, generator) = cli.build_dashboard()?;
    run_with_ui(dashboard, generator);
    Ok(())
}

#[cfg(not(feature = "ui"))]
fn run_ui(_cli: &Cli) -> Result<()> {
    anyhow::bail!("UI feature is not enabled. Rebuild with --features ui")
}

#[cfg(feature = "ui")]
fn run_with_ui(dashboard: Dashboard, generator: IncidentGenerator) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;
    use traffic_watch::ui::{DashboardResource, IncidentSourceResource, TrafficWatchUIPlugin};

    println!("Starting Traffic Watch UI...");
    println!();
    println!("Controls:");
    println!("  S           - Simulate incident");
    println!("  A           - Alert emergency services");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,traffic_watch=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Traffic Watch".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(DashboardResource::new(dashboard))
        .insert_resource(IncidentSourceResource(generator))
        .add_plugins(TrafficWatchUIPlugin)
        .run();
}
