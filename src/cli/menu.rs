//! Interactive menu session
//!
//! A numbered main menu leads to one menu per manager plus the data
//! analyser. Every line of input goes through a [`Prompter`], so the whole
//! session can be driven by a script in tests.

use crate::config::Settings;
use crate::display::format_rows;
use crate::error::{ErpError, ErpResult};
use crate::managers::{headers_for, partners};
use crate::models::{could_be_a_valid_id, Date, TableKind};
use crate::prompt::{ask, Prompter};
use crate::services::RecordService;
use crate::storage::Storage;
use crate::validation::validate_string;

use super::report::{
    run_report, AccountingReport, AnalyserReport, CrmReport, HrReport, InventoryReport,
    LogisticsReport, PartnersReport, ReportCommands, SalesReport, StoreReport,
};

/// Builds a report command from prompted arguments
type ReportPrompt = fn(&mut dyn Prompter) -> ErpResult<ReportCommands>;

enum Action {
    ShowTable,
    Add,
    Update,
    Remove,
    Report(ReportCommands),
    PromptedReport(ReportPrompt),
}

#[derive(Clone, Copy)]
enum Screen {
    Manager(TableKind),
    Analyser,
}

impl Screen {
    fn title(self) -> &'static str {
        match self {
            Screen::Manager(kind) => kind.title(),
            Screen::Analyser => "Data analyser",
        }
    }
}

/// Main menu entries, numbered from 1
const MAIN_MENU: [(&str, Screen); 9] = [
    ("Store manager", Screen::Manager(TableKind::Store)),
    ("Human resources manager", Screen::Manager(TableKind::Hr)),
    ("Inventory manager", Screen::Manager(TableKind::Inventory)),
    ("Accounting manager", Screen::Manager(TableKind::Accounting)),
    ("Sales manager", Screen::Manager(TableKind::Sales)),
    ("Customer relationship management (CRM)", Screen::Manager(TableKind::Crm)),
    ("Logistics manager", Screen::Manager(TableKind::Logistics)),
    ("Partners manager", Screen::Manager(TableKind::Partners)),
    ("Data analyser", Screen::Analyser),
];

const CHOICE_PROMPT: &str = "Please enter a number: ";

/// Run the interactive session until the user exits or input ends
///
/// Changed tables are written back in both cases.
pub fn run_menu(
    storage: &mut Storage,
    settings: &Settings,
    prompter: &mut dyn Prompter,
) -> ErpResult<()> {
    prompter.clear()?;
    match main_menu(storage, settings, prompter) {
        Ok(()) => storage.save_all(),
        Err(ErpError::Interrupted) => {
            storage.save_all()?;
            prompter.message("Input closed. Changes saved.")
        }
        Err(err) => Err(err),
    }
}

fn main_menu(
    storage: &mut Storage,
    settings: &Settings,
    prompter: &mut dyn Prompter,
) -> ErpResult<()> {
    let labels: Vec<&str> = MAIN_MENU.iter().map(|(label, _)| *label).collect();
    loop {
        prompter.message(&render_menu("Main menu", &labels, "Exit program"))?;
        let choice = ask(prompter, CHOICE_PROMPT)?;
        match parse_choice(&choice, MAIN_MENU.len()) {
            Some(0) => return Ok(()),
            Some(n) => sub_menu(storage, settings, prompter, MAIN_MENU[n - 1].1)?,
            None => prompter.error("There is no such option.")?,
        }
    }
}

fn sub_menu(
    storage: &mut Storage,
    settings: &Settings,
    prompter: &mut dyn Prompter,
    screen: Screen,
) -> ErpResult<()> {
    let actions = actions_for(screen);
    let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();

    loop {
        prompter.message(&render_menu(screen.title(), &labels, "Back to main menu"))?;
        let choice = ask(prompter, CHOICE_PROMPT)?;
        let result = match parse_choice(&choice, actions.len()) {
            Some(0) => {
                if let Screen::Manager(kind) = screen {
                    if storage.is_dirty(kind) {
                        storage.save(kind)?;
                    }
                }
                return Ok(());
            }
            Some(n) => perform(storage, settings, prompter, screen, &actions[n - 1].1),
            None => prompter.error("There is no such option."),
        };

        match result {
            Ok(()) => {}
            Err(ErpError::Interrupted) => return Err(ErpError::Interrupted),
            Err(err) => prompter.error(&err.to_string())?,
        }
    }
}

fn perform(
    storage: &mut Storage,
    settings: &Settings,
    prompter: &mut dyn Prompter,
    screen: Screen,
    action: &Action,
) -> ErpResult<()> {
    let command = match (action, screen) {
        (Action::Report(command), _) => command.clone(),
        (Action::PromptedReport(build), _) => build(prompter)?,
        (record_action, Screen::Manager(kind)) => {
            return perform_record_action(storage, settings, prompter, kind, record_action);
        }
        (_, Screen::Analyser) => return Ok(()),
    };
    let output = run_report(storage, settings, &command)?;
    prompter.message(&output)
}

fn perform_record_action(
    storage: &mut Storage,
    settings: &Settings,
    prompter: &mut dyn Prompter,
    kind: TableKind,
    action: &Action,
) -> ErpResult<()> {
    let mut service = RecordService::new(storage, settings);
    match action {
        Action::ShowTable => {
            let table = service.list(kind, None, false)?;
            prompter.message(&format_rows(headers_for(kind), &table))
        }
        Action::Add => match service.add_interactive(kind, prompter)? {
            Some(id) => prompter.message(&format!("Added record {}", id)),
            None => prompter.message("Cancelled."),
        },
        Action::Update => {
            let id = ask_id(prompter, "ID of the record to update: ")?;
            match service.update_interactive(kind, &id, prompter)? {
                Some(_) => prompter.message(&format!("Updated record {}", id)),
                None => prompter.message("Cancelled."),
            }
        }
        Action::Remove => {
            let id = ask_id(prompter, "ID of the record to remove: ")?;
            service.remove(kind, &id)?;
            prompter.message(&format!("Removed record {}", id))
        }
        Action::Report(_) | Action::PromptedReport(_) => Ok(()),
    }
}

fn render_menu(title: &str, labels: &[&str], zero_label: &str) -> String {
    let mut output = format!("{}:\n", title);
    for (index, label) in labels.iter().enumerate() {
        output.push_str(&format!("    ({}) {}\n", index + 1, label));
    }
    output.push_str(&format!("    (0) {}", zero_label));
    output
}

/// Parse a menu choice between 0 and `max`
fn parse_choice(input: &str, max: usize) -> Option<usize> {
    input.trim().parse().ok().filter(|choice| *choice <= max)
}

/// Prompt until `parse` accepts the answer
fn ask_valid<T, F>(prompter: &mut dyn Prompter, prompt: &str, parse: F) -> ErpResult<T>
where
    F: Fn(&str) -> Option<T>,
{
    loop {
        let answer = ask(prompter, prompt)?;
        if let Some(value) = parse(answer.trim()) {
            return Ok(value);
        }
        prompter.error("Incorrect input!")?;
    }
}

/// Ask for a record ID; lookups report IDs that don't exist
fn ask_id(prompter: &mut dyn Prompter, prompt: &str) -> ErpResult<String> {
    ask_valid(prompter, prompt, |s| validate_string(s).then(|| s.to_string()))
}

fn ask_count(prompter: &mut dyn Prompter) -> ErpResult<usize> {
    ask_valid(prompter, "How many results: ", |s| s.parse().ok())
}

fn record_actions() -> Vec<(&'static str, Action)> {
    vec![
        ("Show table", Action::ShowTable),
        ("Add", Action::Add),
        ("Update", Action::Update),
        ("Remove", Action::Remove),
    ]
}

fn actions_for(screen: Screen) -> Vec<(&'static str, Action)> {
    let reports: Vec<(&'static str, Action)> = match screen {
        Screen::Manager(TableKind::Store) => vec![
            (
                "Count games by manufacturer",
                Action::Report(ReportCommands::Store(StoreReport::CountsByManufacturer)),
            ),
            (
                "Average stock of a manufacturer",
                Action::PromptedReport(|p| {
                    let manufacturer = ask_valid(p, "Manufacturer: ", |s| {
                        validate_string(s).then(|| s.to_string())
                    })?;
                    Ok(ReportCommands::Store(StoreReport::AverageStock { manufacturer }))
                }),
            ),
        ],
        Screen::Manager(TableKind::Hr) => vec![
            ("Oldest persons", Action::Report(ReportCommands::Hr(HrReport::Oldest))),
            (
                "Persons closest to the average age",
                Action::Report(ReportCommands::Hr(HrReport::ClosestToAverage)),
            ),
        ],
        Screen::Manager(TableKind::Inventory) => vec![
            (
                "Available items",
                Action::Report(ReportCommands::Inventory(InventoryReport::Available)),
            ),
            (
                "Average durability by manufacturer",
                Action::Report(ReportCommands::Inventory(InventoryReport::AverageDurability)),
            ),
        ],
        Screen::Manager(TableKind::Accounting) => vec![
            (
                "Year with the highest profit",
                Action::Report(ReportCommands::Accounting(AccountingReport::HighestProfitYear)),
            ),
            (
                "Average profit per item in a year",
                Action::PromptedReport(|p| {
                    let year = ask_valid(p, "Year: ", |s| s.parse().ok())?;
                    Ok(ReportCommands::Accounting(AccountingReport::AverageProfit { year }))
                }),
            ),
        ],
        Screen::Manager(TableKind::Sales) => vec![
            (
                "ID of the lowest priced sale",
                Action::Report(ReportCommands::Sales(SalesReport::LowestPrice)),
            ),
            (
                "Sales between two dates",
                Action::PromptedReport(|p| {
                    let from = ask_valid(p, "From (YYYY/M/D): ", |s| s.parse::<Date>().ok())?;
                    let to = ask_valid(p, "To (YYYY/M/D): ", |s| s.parse::<Date>().ok())?;
                    Ok(ReportCommands::Sales(SalesReport::SoldBetween { from, to }))
                }),
            ),
            (
                "Last sold item",
                Action::Report(ReportCommands::Sales(SalesReport::LastSold)),
            ),
            (
                "Sum of prices",
                Action::PromptedReport(|p| {
                    let ids = ask_valid(p, "Sale IDs, separated by commas: ", |s| {
                        let ids: Vec<String> =
                            s.split(',').map(|id| id.trim().to_string()).collect();
                        ids.iter().all(|id| could_be_a_valid_id(id)).then_some(ids)
                    })?;
                    Ok(ReportCommands::Sales(SalesReport::SumOfPrices { ids }))
                }),
            ),
            (
                "Customer of a sale",
                Action::PromptedReport(|p| {
                    let sale_id = ask_id(p, "Sale ID: ")?;
                    Ok(ReportCommands::Sales(SalesReport::Customer { sale_id }))
                }),
            ),
            (
                "Customers with a sale",
                Action::Report(ReportCommands::Sales(SalesReport::Customers)),
            ),
            (
                "Sale IDs per customer",
                Action::Report(ReportCommands::Sales(SalesReport::SalesPerCustomer)),
            ),
            (
                "Number of sales per customer",
                Action::Report(ReportCommands::Sales(SalesReport::CountPerCustomer)),
            ),
            (
                "Spending per customer",
                Action::Report(ReportCommands::Sales(SalesReport::SpendingPerCustomer)),
            ),
        ],
        Screen::Manager(TableKind::Crm) => vec![
            (
                "ID of the longest name",
                Action::Report(ReportCommands::Crm(CrmReport::LongestName)),
            ),
            (
                "Subscribed customers",
                Action::Report(ReportCommands::Crm(CrmReport::Subscribed)),
            ),
            (
                "Name of a customer",
                Action::PromptedReport(|p| {
                    let id = ask_id(p, "Customer ID: ")?;
                    Ok(ReportCommands::Crm(CrmReport::Name { id }))
                }),
            ),
        ],
        Screen::Manager(TableKind::Logistics) => vec![
            (
                "Payment due per retailer",
                Action::Report(ReportCommands::Logistics(LogisticsReport::DuePerRetailer)),
            ),
            (
                "Orders by arrival date",
                Action::Report(ReportCommands::Logistics(LogisticsReport::ByArrival)),
            ),
        ],
        Screen::Manager(TableKind::Partners) => vec![(
            "Partner information",
            Action::PromptedReport(|p| {
                let id = ask_id(p, "Partner ID: ")?;
                let field = ask_valid(p, "Field (Name, Contact person, E-mail, Phone, Address): ", |s| {
                    partners::HEADERS[1..]
                        .iter()
                        .find(|header| header.eq_ignore_ascii_case(s))
                        .map(|header| header.to_string())
                })?;
                Ok(ReportCommands::Partners(PartnersReport::Info { id, field }))
            }),
        )],
        Screen::Analyser => vec![
            (
                "Last buyer",
                Action::Report(ReportCommands::Analyser(AnalyserReport::LastBuyer)),
            ),
            (
                "Customer who spent the most",
                Action::Report(ReportCommands::Analyser(AnalyserReport::TopSpender)),
            ),
            (
                "Most frequent buyers by ID",
                Action::PromptedReport(|p| {
                    let count = ask_count(p)?;
                    Ok(ReportCommands::Analyser(AnalyserReport::FrequentBuyers {
                        count,
                        names: false,
                    }))
                }),
            ),
            (
                "Most frequent buyers by name",
                Action::PromptedReport(|p| {
                    let count = ask_count(p)?;
                    Ok(ReportCommands::Analyser(AnalyserReport::FrequentBuyers {
                        count,
                        names: true,
                    }))
                }),
            ),
            (
                "Customers without a sale",
                Action::Report(ReportCommands::Analyser(AnalyserReport::IdleCustomers)),
            ),
            (
                "E-mail addresses of buyers",
                Action::Report(ReportCommands::Analyser(AnalyserReport::BuyerEmails)),
            ),
            (
                "Contacts for the earliest arrivals",
                Action::PromptedReport(|p| {
                    let count = ask_count(p)?;
                    Ok(ReportCommands::Analyser(AnalyserReport::EarliestArrivals { count }))
                }),
            ),
            (
                "Partners with the largest dues",
                Action::PromptedReport(|p| {
                    let count = ask_count(p)?;
                    Ok(ReportCommands::Analyser(AnalyserReport::ExpensiveOrders { count }))
                }),
            ),
        ],
    };

    match screen {
        Screen::Manager(_) => record_actions().into_iter().chain(reports).collect(),
        Screen::Analyser => reports,
    }
}
