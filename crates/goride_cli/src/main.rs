//! GoRide command-line shell: seeds the demo city, forwards ride requests
//! to `dispatch_core`, and renders receipts, the driver table, statistics,
//! and the ASCII map. No matching or pricing logic lives here.

use std::io::{self, BufRead, Write};

use bevy_ecs::prelude::World;
use clap::{Parser, Subcommand};

use dispatch_core::clock::DispatchClock;
use dispatch_core::dispatch::{dispatch, RideReceipt, RideRequest};
use dispatch_core::ecs::{Driver, DriverState, Position, Rider};
use dispatch_core::network::NodeId;
use dispatch_core::roster::DriverRoster;
use dispatch_core::scenario::{build_scenario, ScenarioParams};
use dispatch_core::telemetry::driver_statistics;

#[derive(Parser)]
#[command(
    name = "goride",
    about = "GoRide ride matching system",
    long_about = "Seeds the demo city (8 nodes, 7 drivers) and dispatches\n\
                  rides against it: nearest available driver of the requested\n\
                  vehicle type, priced by road distance."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a ride between two nodes of the demo city
    Ride {
        /// Pickup node (1-8)
        pickup: u32,
        /// Drop-off node (1-8)
        drop: u32,
        /// Vehicle type: Bike, Auto, Car or SUV (case-insensitive)
        #[arg(long, default_value = "Bike")]
        vehicle: String,
        #[arg(long, default_value = "Guest")]
        rider_name: String,
        #[arg(long, default_value_t = 1)]
        rider_id: u32,
        /// Print the receipt as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Skip the post-ride rating prompt
        #[arg(long)]
        skip_rating: bool,
    },
    /// Show the driver roster and availability
    Drivers,
    /// Show driver statistics
    Stats,
    /// Print the ASCII city map
    Map,
}

fn main() {
    let cli = Cli::parse();
    let mut world = World::new();
    build_scenario(&mut world, ScenarioParams::default());

    match cli.command {
        Commands::Ride {
            pickup,
            drop,
            vehicle,
            rider_name,
            rider_id,
            json,
            skip_rating,
        } => {
            let rider = Rider::new(rider_name, rider_id);
            println!(
                "\nBooking ride for {} from Node {} to Node {}",
                rider.name, pickup, drop
            );
            let request = RideRequest::new(rider, NodeId(pickup), NodeId(drop), vehicle);
            match dispatch(&mut world, &request) {
                Ok(receipt) => {
                    if json {
                        match serde_json::to_string_pretty(&receipt) {
                            Ok(rendered) => println!("{rendered}"),
                            Err(err) => eprintln!("failed to render receipt: {err}"),
                        }
                    } else {
                        print_receipt(&receipt);
                        print_drivers(&world);
                        if !skip_rating {
                            prompt_for_rating();
                        }
                    }
                }
                Err(err) => println!("Sorry! {err}."),
            }
        }
        Commands::Drivers => print_drivers(&world),
        Commands::Stats => print_stats(&world),
        Commands::Map => print_map(),
    }
}

fn print_receipt(receipt: &RideReceipt) {
    println!("\n========== Ride Receipt ==========");
    println!("Rider: {}", receipt.rider.name);
    println!("Driver: {}", receipt.driver_name);
    println!("Vehicle: {}", receipt.vehicle);
    println!("Start Location: Node {}", receipt.pickup);
    println!("Destination: Node {}", receipt.dropoff);
    println!("Distance: {} units", receipt.distance);
    println!("Estimated Duration: {} minutes", receipt.duration_min);
    println!("Fare: {}", receipt.fare);
    println!("==================================");
}

fn print_drivers(world: &World) {
    let now = world.resource::<DispatchClock>().now();
    println!("\n--- Drivers ---");
    for &entity in world.resource::<DriverRoster>().entities() {
        let (Some(driver), Some(position)) =
            (world.get::<Driver>(entity), world.get::<Position>(entity))
        else {
            continue;
        };
        let availability = match driver.state {
            DriverState::OnTrip { ready_at_min } if !driver.state.is_available(now) => {
                format!("[On trip till {ready_at_min} min]")
            }
            _ => "[Available]".to_string(),
        };
        println!(
            "Driver: {} | Vehicle: {} | Location: Node {} | {}",
            driver.name, driver.vehicle, position.0, availability
        );
    }
}

fn print_stats(world: &World) {
    let stats = driver_statistics(world);
    println!("\n===== Driver Statistics =====");
    println!("Total Drivers: {}", stats.total);
    println!("Available Drivers: {}", stats.available_now);
    println!("Vehicle Type Distribution:");
    let mut breakdown: Vec<_> = stats.by_vehicle.iter().collect();
    breakdown.sort_by_key(|(vehicle, _)| vehicle.name());
    for (vehicle, count) in breakdown {
        println!("  - {vehicle}: {count}");
    }
    println!("=============================");
}

fn print_map() {
    println!(
        r#"
--- Demo City Map ---
         (1)----4----(2)---5---(4)
          |           |         |
          2           5         3
          |           |         |
         (3)----1----(6)---3---(5)
                      \
                       2
                        \
                        (7)---2---(8)
"#
    );
}

/// Post-ride rating prompt: re-asks until the input parses to 1..=5.
fn prompt_for_rating() {
    let stdin = io::stdin();
    loop {
        print!("\nPlease rate your experience (1 to 5 stars): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        match line.trim().parse::<u8>() {
            Ok(rating @ 1..=5) => {
                let plural = if rating > 1 { "s" } else { "" };
                println!("Thank you for rating us {rating} star{plural}!");
                return;
            }
            _ => println!("Invalid input. Please enter a number between 1 and 5."),
        }
    }
}
