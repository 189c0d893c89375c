// Shared fixtures for contextmap integration tests
#![allow(dead_code)]

use contextmap::SourceFile;
use indoc::indoc;
use std::fs;
use std::path::Path;

/// Route `log` output through the test harness; safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn source(path: &str, content: &str) -> SourceFile {
    SourceFile::new(path, content)
}

/// Write `(relative path, content)` pairs under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

pub const TYPES_ORDER: &str = indoc! {r#"
    export type OrderStatus = 'open' | 'closed';
    export interface Order {
      id: string;
      status: OrderStatus;
    }
"#};

pub const ORDERS_CREATE: &str = indoc! {r#"
    import { Order } from '../types/order';
    import { v4 } from 'uuid';

    export function createOrder(): Order {
      return { id: v4(), status: 'open' };
    }
"#};

pub const INDEX: &str = indoc! {r#"
    import { createOrder } from './orders/create';

    export const api = { createOrder };
"#};

pub const BILLING_INVOICE: &str = indoc! {r#"
    import { payInvoice } from './payment';

    export function createInvoice(amount: number) {
      return { amount, paid: false, settle: () => payInvoice(amount) };
    }
"#};

pub const BILLING_PAYMENT: &str = indoc! {r#"
    import { createInvoice } from './invoice';

    export function payInvoice(amount: number) {
      const invoice = createInvoice(amount);
      return { ...invoice, paid: true };
    }
"#};

/// A small storefront: an order slice spread over three directories, a type
/// module, a barrel, and two billing files importing each other.
pub fn storefront() -> Vec<SourceFile> {
    vec![
        source("src/types/order.ts", TYPES_ORDER),
        source("src/orders/create.ts", ORDERS_CREATE),
        source("src/index.ts", INDEX),
        source("src/billing/invoice.ts", BILLING_INVOICE),
        source("src/billing/payment.ts", BILLING_PAYMENT),
    ]
}

/// A file long enough to dodge the small-barrel shape, exporting one
/// function per name with padding in between.
pub fn long_module(names: &[&str], total_lines: usize) -> String {
    let mut lines: Vec<String> = names
        .iter()
        .map(|name| format!("export function {}() {{ return null; }}", name))
        .collect();
    while lines.len() < total_lines {
        lines.push(format!("// line {}", lines.len()));
    }
    lines.join("\n")
}
