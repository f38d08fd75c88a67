//! Data analyser
//!
//! Reports that join several tables: sales against customers, and incoming
//! orders against the partner registry. Every function takes the tables it
//! reads explicitly.
//!
//! Customers referenced by a sale but missing from the CRM table are shown by
//! their ID wherever a name is expected.

use std::collections::BTreeMap;

use crate::error::ErpResult;
use crate::models::{Date, Table};
use crate::sort::{sort, sort_values};

use super::{crm, logistics, partners, sales};

fn customer_label(customers: &Table, id: &str) -> String {
    crm::name_by_id(customers, id).unwrap_or_else(|| id.to_string())
}

/// Keep at most `count` leading entries
fn take<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    items.truncate(count);
    items
}

/// Customer ID of the most recent sale
pub fn last_buyer_id(sales_table: &Table) -> ErpResult<Option<String>> {
    Ok(sales::last_sold(sales_table)?
        .and_then(|row| row.cell(sales::CUSTOMER_ID))
        .map(str::to_string))
}

/// Name of the customer who made the most recent sale
pub fn last_buyer_name(sales_table: &Table, customers: &Table) -> ErpResult<Option<String>> {
    Ok(last_buyer_id(sales_table)?.map(|id| customer_label(customers, &id)))
}

/// Customer ID that spent the most, with the amount
///
/// Equal totals resolve to the smallest customer ID.
pub fn top_spender_id(sales_table: &Table) -> ErpResult<Option<(String, i64)>> {
    let mut top: Option<(String, i64)> = None;
    for (customer, spent) in sales::spending_per_customer(sales_table)? {
        if top.as_ref().map_or(true, |(_, best)| spent > *best) {
            top = Some((customer, spent));
        }
    }
    Ok(top)
}

/// Name of the customer who spent the most, with the amount
pub fn top_spender_name(sales_table: &Table, customers: &Table) -> ErpResult<Option<(String, i64)>> {
    Ok(top_spender_id(sales_table)?.map(|(id, spent)| (customer_label(customers, &id), spent)))
}

/// The `count` customer IDs with the most sales, busiest first
pub fn most_frequent_buyer_ids(sales_table: &Table, count: usize) -> Vec<(String, usize)> {
    let frequencies: Vec<(String, usize)> = sales::sales_count_per_customer(sales_table)
        .into_iter()
        .collect();
    take(sort(&frequencies, |(_, sold)| *sold, true), count)
}

/// The `count` customer names with the most sales, busiest first
pub fn most_frequent_buyer_names(
    sales_table: &Table,
    customers: &Table,
    count: usize,
) -> Vec<(String, usize)> {
    let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
    for (id, sold) in sales::sales_count_per_customer(sales_table) {
        *by_name.entry(customer_label(customers, &id)).or_insert(0) += sold;
    }
    let frequencies: Vec<(String, usize)> = by_name.into_iter().collect();
    take(sort(&frequencies, |(_, sold)| *sold, true), count)
}

/// `(name, id)` of every customer without a sale, sorted
pub fn idle_customers(sales_table: &Table, customers: &Table) -> Vec<(String, String)> {
    let buyers = sales::customer_ids(sales_table);
    let idle: Vec<(String, String)> = crm::customer_ids(customers)
        .into_iter()
        .filter(|id| !buyers.contains(id))
        .map(|id| (customer_label(customers, &id), id))
        .collect();
    sort_values(&idle, false)
}

/// `(name, email)` of every customer with at least one sale, sorted
pub fn buyer_emails(sales_table: &Table, customers: &Table) -> Vec<(String, String)> {
    let pairs: Vec<(String, String)> = sales::customer_ids(sales_table)
        .into_iter()
        .filter_map(|id| Some((crm::name_by_id(customers, &id)?, crm::email_by_id(customers, &id)?)))
        .collect();
    sort_values(&pairs, false)
}

/// Arrival date, contact person and phone of the `count` earliest orders
///
/// An order's retailer is matched to a partner by name; orders from
/// retailers not in the registry are skipped.
pub fn earliest_arrival_contacts(
    orders: &Table,
    registry: &Table,
    count: usize,
) -> ErpResult<Vec<(Date, String, String)>> {
    let mut contacts = Vec::new();
    if count == 0 {
        return Ok(contacts);
    }

    for order in logistics::orders_by_arrival(orders)? {
        let retailer = order.text(logistics::RETAILER)?;
        let Some(partner) = partners::find_by_name(registry, retailer) else {
            continue;
        };
        contacts.push((
            logistics::arrival_date(&order)?,
            partner.cell(partners::CONTACT).unwrap_or_default().to_string(),
            partner.cell(partners::PHONE).unwrap_or_default().to_string(),
        ));
        if contacts.len() == count {
            break;
        }
    }
    Ok(contacts)
}

/// Partner name, e-mail, address and amount due, largest dues first
///
/// Retailers not in the registry are skipped.
pub fn most_expensive_orders(
    orders: &Table,
    registry: &Table,
    count: usize,
) -> ErpResult<Vec<(String, String, String, i64)>> {
    let dues: Vec<(String, String, String, i64)> = logistics::total_due_per_retailer(orders)?
        .into_iter()
        .filter_map(|(retailer, due)| {
            let partner = partners::find_by_name(registry, &retailer)?;
            Some((
                retailer,
                partner.cell(partners::EMAIL).unwrap_or_default().to_string(),
                partner.cell(partners::ADDRESS).unwrap_or_default().to_string(),
                due,
            ))
        })
        .collect();
    Ok(take(sort(&dues, |(.., due)| *due, true), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::managers::crm::tests::customers;
    use crate::managers::logistics::tests::orders;
    use crate::managers::partners::tests::partners;
    use crate::managers::sales::tests::sales;

    #[test]
    fn test_last_buyer() {
        assert_eq!(last_buyer_id(&sales()).unwrap().as_deref(), Some("jH34Jk#&"));
        assert_eq!(
            last_buyer_name(&sales(), &customers()).unwrap().as_deref(),
            Some("Missy Stoney")
        );
    }

    #[test]
    fn test_top_spender() {
        assert_eq!(
            top_spender_id(&sales()).unwrap(),
            Some(("jH34Jk#&".to_string(), 141))
        );
        assert_eq!(
            top_spender_name(&sales(), &customers()).unwrap(),
            Some(("Missy Stoney".to_string(), 141))
        );
        assert_eq!(top_spender_id(&Table::new()).unwrap(), None);
    }

    #[test]
    fn test_most_frequent_buyers() {
        assert_eq!(
            most_frequent_buyer_ids(&sales(), 2),
            [("jH34Jk#&".to_string(), 5), ("kH14Jt#&".to_string(), 2)]
        );
        assert_eq!(
            most_frequent_buyer_names(&sales(), &customers(), 2),
            [("Missy Stoney".to_string(), 5), ("Sadye Hession".to_string(), 2)]
        );
        assert_eq!(most_frequent_buyer_ids(&sales(), 10).len(), 3);
    }

    #[test]
    fn test_unknown_customer_shown_by_id() {
        assert_eq!(
            most_frequent_buyer_names(&sales(), &Table::new(), 1),
            [("jH34Jk#&".to_string(), 5)]
        );
    }

    #[test]
    fn test_idle_customers() {
        let idle = idle_customers(&sales(), &customers());
        assert_eq!(
            idle,
            [
                ("Adrianna Verduzco".to_string(), "kH14Ju#&".to_string()),
                ("Lieselotte Rainey".to_string(), "kH38Jm#&".to_string()),
                ("Phylis Farberanmt".to_string(), "kH94Ju#&".to_string()),
            ]
        );
    }

    #[test]
    fn test_buyer_emails() {
        assert_eq!(
            buyer_emails(&sales(), &customers()),
            [
                ("Kanesha Moshier".to_string(), "u6vt7o4@n7a-0t.com".to_string()),
                (
                    "Missy Stoney".to_string(),
                    "ixnqwxkgvlppx9@4qt-a5jtsj.com".to_string()
                ),
                ("Sadye Hession".to_string(), "ufvp64.ghw5@r2l3f1.com".to_string()),
            ]
        );
    }

    #[test]
    fn test_earliest_arrival_contacts() {
        let contacts = earliest_arrival_contacts(&orders(), &partners(), 2).unwrap();
        assert_eq!(
            contacts,
            [
                (
                    Date::new(2017, 12, 24).unwrap(),
                    "Bob Jones".to_string(),
                    "555-0202".to_string()
                ),
                (
                    Date::new(2018, 1, 15).unwrap(),
                    "Ann Smith".to_string(),
                    "555-0101".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_most_expensive_orders_skip_unregistered_retailers() {
        let dues = most_expensive_orders(&orders(), &partners(), 5).unwrap();
        assert_eq!(dues.len(), 2);
        assert_eq!(dues[0].0, "TechCorp");
        assert_eq!(dues[0].3, 250);
        assert_eq!(dues[1].0, "ScreenWorks");
        assert_eq!(dues[1].2, "2 High St");
    }
}
