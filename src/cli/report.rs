//! Report CLI commands
//!
//! Every manager report, grouped by manager. [`run_report`] returns the
//! rendered report so the interactive menu can reuse it.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{
    format_average, format_grid, format_list, format_map, format_pairs, format_result, format_rows,
};
use crate::error::{ErpError, ErpResult};
use crate::managers::{
    accounting, analyser, crm, hr, inventory, logistics, partners, sales, store,
};
use crate::models::{Date, TableKind};
use crate::storage::Storage;

/// Report subcommands, one group per manager
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ReportCommands {
    /// Accounting reports
    #[command(subcommand)]
    Accounting(AccountingReport),
    /// Customer reports
    #[command(subcommand)]
    Crm(CrmReport),
    /// Human resources reports
    #[command(subcommand)]
    Hr(HrReport),
    /// Inventory reports
    #[command(subcommand)]
    Inventory(InventoryReport),
    /// Logistics reports
    #[command(subcommand)]
    Logistics(LogisticsReport),
    /// Partner registry lookups
    #[command(subcommand)]
    Partners(PartnersReport),
    /// Sales reports
    #[command(subcommand)]
    Sales(SalesReport),
    /// Store reports
    #[command(subcommand)]
    Store(StoreReport),
    /// Reports combining several tables
    #[command(subcommand)]
    Analyser(AnalyserReport),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AccountingReport {
    /// Year with the highest profit
    HighestProfitYear,
    /// Average profit per item in a year
    AverageProfit {
        /// Year to average over
        year: i64,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CrmReport {
    /// ID of the customer with the longest name
    LongestName,
    /// E-mail and name of subscribed customers
    Subscribed,
    /// Name of a customer
    Name {
        /// Customer ID
        id: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum HrReport {
    /// Names of the oldest persons
    Oldest,
    /// Names of the persons closest to the average birth year
    ClosestToAverage,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum InventoryReport {
    /// Items still within their durability
    Available,
    /// Average durability per manufacturer
    AverageDurability,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum LogisticsReport {
    /// Total amount due per retailer
    DuePerRetailer,
    /// Orders sorted by arrival date
    ByArrival,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PartnersReport {
    /// One field of a partner
    Info {
        /// Partner ID
        id: String,
        /// Column header, e.g. "Phone"
        field: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SalesReport {
    /// ID of the cheapest sale
    LowestPrice,
    /// Sales strictly between two dates
    SoldBetween {
        /// Start date (YYYY/M/D, excluded)
        from: Date,
        /// End date (YYYY/M/D, excluded)
        to: Date,
    },
    /// ID and title of the most recent sale
    LastSold,
    /// Sum of the prices of the given sales
    SumOfPrices {
        /// Sale IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Customer of a sale
    Customer {
        /// Sale ID
        sale_id: String,
    },
    /// IDs of all customers with a sale
    Customers,
    /// Sale IDs of each customer
    SalesPerCustomer,
    /// Number of sales of each customer
    CountPerCustomer,
    /// Amount spent by each customer
    SpendingPerCustomer,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StoreReport {
    /// Number of games per manufacturer
    CountsByManufacturer,
    /// Average stock of a manufacturer's games
    AverageStock {
        /// Manufacturer name
        manufacturer: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AnalyserReport {
    /// ID and name of the customer behind the most recent sale
    LastBuyer,
    /// Customer who spent the most, with the amount
    TopSpender,
    /// Customers with the most sales
    FrequentBuyers {
        /// How many customers to show
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Show names instead of IDs
        #[arg(long)]
        names: bool,
    },
    /// Customers without any sale
    IdleCustomers,
    /// Name and e-mail of customers with a sale
    BuyerEmails,
    /// Contact details for the earliest order arrivals
    EarliestArrivals {
        /// How many orders to show
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Partners with the largest amounts due
    ExpensiveOrders {
        /// How many partners to show
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ErpResult<()> {
    println!("{}", run_report(storage, settings, &cmd)?);
    Ok(())
}

/// Compute and render a report
pub fn run_report(storage: &Storage, settings: &Settings, cmd: &ReportCommands) -> ErpResult<String> {
    match cmd {
        ReportCommands::Accounting(report) => accounting_report(storage, report),
        ReportCommands::Crm(report) => crm_report(storage, report),
        ReportCommands::Hr(report) => hr_report(storage, report),
        ReportCommands::Inventory(report) => inventory_report(storage, settings, report),
        ReportCommands::Logistics(report) => logistics_report(storage, report),
        ReportCommands::Partners(report) => partners_report(storage, report),
        ReportCommands::Sales(report) => sales_report(storage, report),
        ReportCommands::Store(report) => store_report(storage, report),
        ReportCommands::Analyser(report) => analyser_report(storage, report),
    }
}

fn accounting_report(storage: &Storage, report: &AccountingReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Accounting);
    match report {
        AccountingReport::HighestProfitYear => Ok(format_result(
            "Year with the highest profit",
            accounting::year_with_highest_profit(table)?,
        )),
        AccountingReport::AverageProfit { year } => {
            let average = accounting::average_profit_per_item(table, *year)?;
            Ok(format!(
                "Average profit per item in {}: {}",
                year,
                format_average(average)
            ))
        }
    }
}

fn crm_report(storage: &Storage, report: &CrmReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Crm);
    match report {
        CrmReport::LongestName => Ok(format_result(
            "Customer with the longest name",
            crm::longest_name_id(table),
        )),
        CrmReport::Subscribed => Ok(format_pairs(
            ["E-mail", "Name"],
            &crm::subscribed_emails(table),
        )),
        CrmReport::Name { id } => crm::name_by_id(table, id)
            .map(|name| format!("Name: {}", name))
            .ok_or_else(|| ErpError::record_not_found(id.clone())),
    }
}

fn hr_report(storage: &Storage, report: &HrReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Hr);
    match report {
        HrReport::Oldest => Ok(format_list("Oldest persons", &hr::oldest_persons(table)?)),
        HrReport::ClosestToAverage => Ok(format_list(
            "Closest to the average age",
            &hr::persons_closest_to_average(table)?,
        )),
    }
}

fn inventory_report(
    storage: &Storage,
    settings: &Settings,
    report: &InventoryReport,
) -> ErpResult<String> {
    let table = storage.table(TableKind::Inventory);
    match report {
        InventoryReport::Available => {
            let available = inventory::available_items(table, settings.current_year)?;
            Ok(format_rows(&inventory::HEADERS, &available))
        }
        InventoryReport::AverageDurability => {
            let averages = inventory::average_durability_by_manufacturer(table)?;
            let rendered: Vec<(String, String)> = averages
                .into_iter()
                .map(|(manufacturer, average)| (manufacturer, format_average(average)))
                .collect();
            Ok(format_pairs(["Manufacturer", "Average durability"], &rendered))
        }
    }
}

fn logistics_report(storage: &Storage, report: &LogisticsReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Logistics);
    match report {
        LogisticsReport::DuePerRetailer => Ok(format_map(
            ["Retailer", "Payment due"],
            &logistics::total_due_per_retailer(table)?,
        )),
        LogisticsReport::ByArrival => Ok(format_rows(
            &logistics::HEADERS,
            &logistics::orders_by_arrival(table)?,
        )),
    }
}

fn partners_report(storage: &Storage, report: &PartnersReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Partners);
    match report {
        PartnersReport::Info { id, field } => {
            let column = partners::HEADERS
                .iter()
                .position(|header| header.eq_ignore_ascii_case(field))
                .ok_or_else(|| ErpError::column_not_found(field.clone()))?;
            partners::info_by_id(table, id, column)
                .map(|value| format!("{}: {}", partners::HEADERS[column], value))
                .ok_or_else(|| ErpError::record_not_found(id.clone()))
        }
    }
}

fn sales_report(storage: &Storage, report: &SalesReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Sales);
    match report {
        SalesReport::LowestPrice => Ok(format_result(
            "Lowest priced sale",
            sales::lowest_price_item_id(table)?,
        )),
        SalesReport::SoldBetween { from, to } => Ok(format_rows(
            &sales::HEADERS,
            &sales::items_sold_between(table, from, to)?,
        )),
        SalesReport::LastSold => {
            let id = sales::item_id_sold_last(table)?;
            let title = sales::item_title_sold_last(table)?;
            Ok(format!(
                "{}\n{}",
                format_result("Last sold ID", id),
                format_result("Last sold title", title)
            ))
        }
        SalesReport::SumOfPrices { ids } => Ok(format!(
            "Sum of prices: {}",
            sales::sum_of_prices(table, ids.as_slice())?
        )),
        SalesReport::Customer { sale_id } => sales::customer_id_by_sale_id(table, sale_id)
            .map(|customer| format!("Customer ID: {}", customer))
            .ok_or_else(|| ErpError::record_not_found(sale_id.clone())),
        SalesReport::Customers => {
            let ids: Vec<String> = sales::customer_ids(table).into_iter().collect();
            Ok(format_list("Customers", &ids))
        }
        SalesReport::SalesPerCustomer => {
            let per_customer = sales::sales_ids_per_customer(table);
            Ok(format_grid(
                &["Customer ID", "Sale IDs"],
                per_customer
                    .into_iter()
                    .map(|(customer, ids)| vec![customer, ids.join(", ")]),
            ))
        }
        SalesReport::CountPerCustomer => Ok(format_map(
            ["Customer ID", "Number of sales"],
            &sales::sales_count_per_customer(table),
        )),
        SalesReport::SpendingPerCustomer => Ok(format_map(
            ["Customer ID", "Spent"],
            &sales::spending_per_customer(table)?,
        )),
    }
}

fn store_report(storage: &Storage, report: &StoreReport) -> ErpResult<String> {
    let table = storage.table(TableKind::Store);
    match report {
        StoreReport::CountsByManufacturer => Ok(format_map(
            ["Manufacturer", "Games"],
            &store::counts_by_manufacturer(table),
        )),
        StoreReport::AverageStock { manufacturer } => Ok(format_result(
            "Average stock",
            store::average_stock_by_manufacturer(table, manufacturer)?.map(format_average),
        )),
    }
}

fn analyser_report(storage: &Storage, report: &AnalyserReport) -> ErpResult<String> {
    let sales_table = storage.table(TableKind::Sales);
    let customers = storage.table(TableKind::Crm);
    let orders = storage.table(TableKind::Logistics);
    let registry = storage.table(TableKind::Partners);

    match report {
        AnalyserReport::LastBuyer => Ok(format!(
            "{}\n{}",
            format_result("Last buyer ID", analyser::last_buyer_id(sales_table)?),
            format_result(
                "Last buyer name",
                analyser::last_buyer_name(sales_table, customers)?
            )
        )),
        AnalyserReport::TopSpender => {
            let by_id = analyser::top_spender_id(sales_table)?;
            let by_name = analyser::top_spender_name(sales_table, customers)?;
            let rows: Vec<Vec<String>> = by_id
                .into_iter()
                .zip(by_name)
                .map(|((id, spent), (name, _))| vec![id, name, spent.to_string()])
                .collect();
            Ok(format_grid(&["Customer ID", "Name", "Spent"], rows))
        }
        AnalyserReport::FrequentBuyers { count, names } => {
            if *names {
                Ok(format_pairs(
                    ["Customer Name", "Number of Sales"],
                    &analyser::most_frequent_buyer_names(sales_table, customers, *count),
                ))
            } else {
                Ok(format_pairs(
                    ["Customer ID", "Number of Sales"],
                    &analyser::most_frequent_buyer_ids(sales_table, *count),
                ))
            }
        }
        AnalyserReport::IdleCustomers => Ok(format_pairs(
            ["Name", "ID"],
            &analyser::idle_customers(sales_table, customers),
        )),
        AnalyserReport::BuyerEmails => Ok(format_pairs(
            ["Name", "E-mail"],
            &analyser::buyer_emails(sales_table, customers),
        )),
        AnalyserReport::EarliestArrivals { count } => {
            let contacts = analyser::earliest_arrival_contacts(orders, registry, *count)?;
            Ok(format_grid(
                &["Date", "Contact person", "Phone"],
                contacts
                    .into_iter()
                    .map(|(date, contact, phone)| vec![date.to_string(), contact, phone]),
            ))
        }
        AnalyserReport::ExpensiveOrders { count } => {
            let dues = analyser::most_expensive_orders(orders, registry, *count)?;
            Ok(format_grid(
                &["Partner", "E-mail", "Address", "Payments due"],
                dues.into_iter().map(|(name, email, address, due)| {
                    vec![name, email, address, due.to_string()]
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ErpPaths;
    use crate::models::Row;
    use tempfile::TempDir;

    fn storage_with_sales() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::open(paths, &Settings::with_current_year(2017)).unwrap();
        let table = storage.table_mut(TableKind::Sales);
        table.push(Row::from_cells(["eH34Ju#&", "Astebreed", "25", "3", "10", "2016", "jH34Jk#&"]));
        table.push(Row::from_cells(["kH35Ju#&", "Age of Empires", "11", "3", "7", "2016", "kH14Jt#&"]));
        storage
            .table_mut(TableKind::Crm)
            .push(Row::from_cells(["jH34Jk#&", "Missy Stoney", "ms@mail.com", "1"]));
        (storage, temp_dir)
    }

    #[test]
    fn test_sales_reports() {
        let (storage, _temp) = storage_with_sales();
        let settings = Settings::with_current_year(2017);

        let lowest = run_report(
            &storage,
            &settings,
            &ReportCommands::Sales(SalesReport::LowestPrice),
        )
        .unwrap();
        assert_eq!(lowest, "Lowest priced sale: kH35Ju#&");

        let sum = run_report(
            &storage,
            &settings,
            &ReportCommands::Sales(SalesReport::SumOfPrices {
                ids: vec!["eH34Ju#&".to_string(), "kH35Ju#&".to_string()],
            }),
        )
        .unwrap();
        assert_eq!(sum, "Sum of prices: 36");
    }

    #[test]
    fn test_analyser_names_fall_back_to_ids() {
        let (storage, _temp) = storage_with_sales();
        let report = run_report(
            &storage,
            &Settings::with_current_year(2017),
            &ReportCommands::Analyser(AnalyserReport::FrequentBuyers {
                count: 5,
                names: true,
            }),
        )
        .unwrap();
        assert!(report.contains("Missy Stoney"));
        assert!(report.contains("kH14Jt#&"));
    }

    #[test]
    fn test_missing_lookup_is_not_found() {
        let (storage, _temp) = storage_with_sales();
        let err = run_report(
            &storage,
            &Settings::with_current_year(2017),
            &ReportCommands::Crm(CrmReport::Name {
                id: "nobody!!".to_string(),
            }),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_table_reports() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ErpPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::with_current_year(2017);
        let storage = Storage::open(paths, &settings).unwrap();

        let report = run_report(
            &storage,
            &settings,
            &ReportCommands::Accounting(AccountingReport::HighestProfitYear),
        )
        .unwrap();
        assert_eq!(report, "Year with the highest profit: (none)");
    }
}
