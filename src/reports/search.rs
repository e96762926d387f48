//! Search and sort helpers behind the order, customer and history tables.

use crate::types::{Order, OrderStatus, User};

/// Sort orders by creation time, newest first. Equal times keep input order.
pub fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

/// Orders whose id, customer name or package name contains `term`
/// (case-insensitive), optionally narrowed to one status. Newest first.
pub fn search_orders(orders: &[Order], term: &str, status: Option<OrderStatus>) -> Vec<Order> {
    let needle = term.to_lowercase();
    let matches = orders
        .iter()
        .filter(|o| {
            needle.is_empty()
                || o.id.to_lowercase().contains(&needle)
                || o.customer_name.to_lowercase().contains(&needle)
                || o.package_name.to_lowercase().contains(&needle)
        })
        .filter(|o| status.map_or(true, |s| o.status == s))
        .cloned()
        .collect();
    newest_first(matches)
}

/// Users whose name or email contains `term` case-insensitively, or whose
/// phone contains it verbatim.
pub fn search_customers(users: &[User], term: &str) -> Vec<User> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle)
                || u.phone.contains(term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, Timestamp};

    fn order(id: &str, customer: &str, package: &str, status: OrderStatus, at: i64) -> Order {
        let ts = Timestamp::from_millis(at).unwrap();
        Order {
            id: id.into(),
            customer_id: "c".into(),
            customer_name: customer.into(),
            package_id: "1".into(),
            package_name: package.into(),
            weight: 1.0,
            total_cost: 1.0,
            status,
            created_at: ts,
            updated_at: ts,
            estimated_time: ts,
        }
    }

    #[test]
    fn test_search_orders() {
        let orders = vec![
            order("ORD-1", "Sari", "Cuci Kering", OrderStatus::Queued, 1),
            order("ORD-2", "Budi", "Setrika Saja", OrderStatus::Done, 2),
            order("ORD-3", "sarah", "Cuci Lipat", OrderStatus::Done, 3),
        ];

        let hits: Vec<String> = search_orders(&orders, "SAR", None).into_iter().map(|o| o.id).collect();
        assert_eq!(hits, vec!["ORD-3", "ORD-1"]);

        let done = search_orders(&orders, "", Some(OrderStatus::Done));
        assert_eq!(done.len(), 2);
        assert_eq!(done[0].id, "ORD-3");

        assert_eq!(search_orders(&orders, "cuci", Some(OrderStatus::Queued)).len(), 1);
    }

    #[test]
    fn test_search_customers() {
        let user = User {
            id: "1".into(),
            name: "Sari Dewi".into(),
            email: "SARI@mail.com".into(),
            phone: "081234".into(),
            username: "sari".into(),
            password: "x".into(),
            role: Role::Customer,
            join_date: Timestamp::from_millis(0).unwrap(),
        };
        let users = vec![user];

        assert_eq!(search_customers(&users, "dewi").len(), 1);
        assert_eq!(search_customers(&users, "sari@").len(), 1);
        assert_eq!(search_customers(&users, "1234").len(), 1);
        assert!(search_customers(&users, "budi").is_empty());
    }
}
