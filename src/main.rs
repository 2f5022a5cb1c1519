use clap::{Args, Parser, Subcommand};
use std::net::TcpListener;
use std::sync::Arc;

use cupcake_corner::app_config::AppConfig;
use cupcake_corner::domain::order::{
    CakeType, DeliveryField, Order, OrderCommand, OrderError, OrderEvent, OrderObserver, OrderStore,
};
use cupcake_corner::metrics::Metrics;
use cupcake_corner::server;
use cupcake_corner::submission::{Checkout, CheckoutError, SubmissionClient};
use cupcake_corner::telemetry;

#[derive(Parser)]
#[command(name = "cupcake-corner", version, about = "Price and place cupcake orders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the price of an order without sending it
    Quote(OrderArgs),
    /// Send an order to the configured endpoint
    Submit {
        #[command(flatten)]
        order: OrderArgs,
        /// Overrides CUPCAKE_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Run a local order endpoint that echoes what it receives
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct OrderArgs {
    /// Flavor name or index (vanilla, strawberry, chocolate, rainbow)
    #[arg(long, default_value = "vanilla")]
    flavor: CakeType,
    #[arg(long, default_value_t = 3)]
    quantity: u32,
    #[arg(long)]
    extra_frosting: bool,
    #[arg(long)]
    sprinkles: bool,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    street: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip: String,
}

impl OrderArgs {
    fn commands(self) -> Vec<OrderCommand> {
        let special = self.extra_frosting || self.sprinkles;
        vec![
            OrderCommand::SelectCakeType { index: self.flavor.index() },
            OrderCommand::SetQuantity { quantity: self.quantity },
            OrderCommand::SetSpecialRequest { enabled: special },
            OrderCommand::SetExtraFrosting { enabled: self.extra_frosting },
            OrderCommand::SetSprinkles { enabled: self.sprinkles },
            OrderCommand::UpdateDelivery { field: DeliveryField::Name, value: self.name },
            OrderCommand::UpdateDelivery { field: DeliveryField::StreetAddress, value: self.street },
            OrderCommand::UpdateDelivery { field: DeliveryField::City, value: self.city },
            OrderCommand::UpdateDelivery { field: DeliveryField::Zip, value: self.zip },
        ]
    }

    fn build(self) -> Result<Order, OrderError> {
        let mut store = OrderStore::default();
        store.add_observer(Arc::new(TraceObserver));
        for command in self.commands() {
            store.execute(command)?;
        }
        Ok(store.snapshot())
    }
}

struct TraceObserver;

impl OrderObserver for TraceObserver {
    fn order_changed(&self, order: &Order, event: &OrderEvent) {
        tracing::debug!(event = ?event, cost = order.cost(), "Order updated");
    }
}

/// The user notice is the error message; the underlying failure is its cause.
fn checkout_failure(error: CheckoutError) -> anyhow::Error {
    let notice = error.user_notice();
    anyhow::Error::new(error).context(notice)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    match cli.command {
        Command::Quote(args) => {
            let order = args.build()?;
            println!("Your total is {}", order.formatted_cost());
            if !order.has_valid_address() {
                println!("Delivery details are incomplete; checkout is disabled.");
            }
        }

        Command::Submit { order, endpoint } => {
            if let Some(endpoint) = endpoint {
                config.endpoint = endpoint;
            }

            let order = order.build()?;
            println!("Your total is {}", order.formatted_cost());

            let metrics = Arc::new(Metrics::new()?);
            let client = SubmissionClient::from_config(&config)?;
            tracing::info!(endpoint = %client.endpoint(), "Placing order");
            let checkout = Checkout::new(client).with_metrics(metrics);

            match checkout.place_order(&order).await {
                Ok(confirmation) => println!("Thank you! {confirmation}"),
                Err(e) => return Err(checkout_failure(e)),
            }
        }

        Command::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let listener = TcpListener::bind((config.bind_address.as_str(), port))?;
            let metrics = Arc::new(Metrics::new()?);
            server::run(listener, metrics)?.await?;
        }
    }

    Ok(())
}
