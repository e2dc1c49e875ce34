//! StoreDesk command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the store database.
//! - Expose the list screens and basic data entry as subcommands.

use clap::{Args, Parser, Subcommand};
use log::error;
use std::process::ExitCode;
use storedesk_core::db::open_db;
use storedesk_core::listing::registry::{
    customer_fields, lead_time_fields, order_fields, store_fields,
};
use storedesk_core::{
    init_logging, AppConfig, CustomerId, CustomerService, FieldRegistry, ListOptions,
    NewCustomerRequest, OrderId, OrderService, Query, ResultPage, SortDirection,
    SqliteCustomerRepository, SqliteOrderRepository, SqliteStoreRepository, StatisticsService,
    StoreId, StoreService,
};

#[derive(Parser, Debug)]
#[command(name = "storedesk", version, about = "Store management listings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List stores.
    Stores(ListArgs),
    /// List customers of a store.
    Customers(ScopedListArgs),
    /// List orders of a store.
    Orders(ScopedListArgs),
    /// Average delivery lead time per customer.
    LeadTimes(ScopedListArgs),
    /// Register a store.
    AddStore { name: String },
    /// Register a customer.
    AddCustomer {
        #[arg(long)]
        store: StoreId,
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Register a pending order.
    AddOrder {
        #[arg(long)]
        store: StoreId,
        #[arg(long)]
        customer: CustomerId,
        /// Order date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Record the delivery of an order.
    Deliver {
        order: OrderId,
        /// Delivery date, YYYY-MM-DD.
        #[arg(long)]
        date: String,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Free-text keyword; empty lists everything.
    #[arg(default_value = "")]
    keyword: String,
    /// Restrict the keyword to one field key.
    #[arg(long)]
    field: Option<String>,
    /// Sort by field key.
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    desc: bool,
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: usize,
}

#[derive(Args, Debug)]
struct ScopedListArgs {
    #[arg(long)]
    store: StoreId,
    #[command(flatten)]
    list: ListArgs,
}

impl ListArgs {
    fn to_query(&self) -> Query {
        let mut query = Query::new(self.keyword.as_str()).at_page(self.page);
        if let Some(field) = self.field.as_deref() {
            query = query.in_field(field);
        }
        if let Some(sort) = self.sort.as_deref() {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            query = query.sorted_by(sort, direction);
        }
        query
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_exit module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }
    let options = config.list_options();
    let conn = open_db(&config.db_path).map_err(|err| format!("database open failed: {err}"))?;

    match cli.command {
        Command::Stores(args) => {
            let service = StoreService::new(SqliteStoreRepository::new(&conn));
            let page = service
                .list_stores(&args.to_query(), &options)
                .map_err(|err| err.to_string())?;
            print_page(store_fields(), &page, &options);
        }
        Command::Customers(args) => {
            let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
            let page = service
                .list_customers(args.store, &args.list.to_query(), &options)
                .map_err(|err| err.to_string())?;
            print_page(customer_fields(), &page, &options);
        }
        Command::Orders(args) => {
            let service = OrderService::new(SqliteOrderRepository::new(&conn));
            let page = service
                .list_orders(args.store, &args.list.to_query(), &options)
                .map_err(|err| err.to_string())?;
            print_page(order_fields(), &page, &options);
        }
        Command::LeadTimes(args) => {
            let service = StatisticsService::new(SqliteOrderRepository::new(&conn));
            let page = service
                .list_lead_times(args.store, &args.list.to_query(), &options)
                .map_err(|err| err.to_string())?;
            print_page(lead_time_fields(), &page, &options);
        }
        Command::AddStore { name } => {
            let service = StoreService::new(SqliteStoreRepository::new(&conn));
            let id = service.create_store(name).map_err(|err| err.to_string())?;
            println!("{id}");
        }
        Command::AddCustomer {
            store,
            name,
            phone,
            address,
        } => {
            let service = CustomerService::new(SqliteCustomerRepository::new(&conn));
            let request = NewCustomerRequest {
                name,
                phone,
                address,
            };
            let id = service
                .create_customer(store, &request)
                .map_err(|err| err.to_string())?;
            println!("{id}");
        }
        Command::AddOrder {
            store,
            customer,
            date,
            note,
        } => {
            let service = OrderService::new(SqliteOrderRepository::new(&conn));
            let id = service
                .create_order(store, customer, &date, &note)
                .map_err(|err| err.to_string())?;
            println!("{id}");
        }
        Command::Deliver { order, date } => {
            let service = OrderService::new(SqliteOrderRepository::new(&conn));
            let delivery = service
                .record_delivery(order, &date)
                .map_err(|err| err.to_string())?;
            println!("{}", delivery.id);
        }
    }

    Ok(())
}

fn print_page(registry: &FieldRegistry, page: &ResultPage, options: &ListOptions) {
    let header = registry
        .descriptors()
        .iter()
        .map(|descriptor| descriptor.label.as_str())
        .collect::<Vec<_>>();
    println!("{}", header.join("\t"));

    for row in &page.rows {
        let cells = registry
            .descriptors()
            .iter()
            .map(|descriptor| {
                row.get(&descriptor.key)
                    .map(|value| value.render())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        println!("{}", cells.join("\t"));
    }

    let page_count = page.page_count().max(1);
    println!(
        "-- page {}/{} ({} matched, {} per page)",
        page.page + 1,
        page_count,
        page.total_matched,
        options.page_size.unwrap_or(page.total_matched)
    );
}
