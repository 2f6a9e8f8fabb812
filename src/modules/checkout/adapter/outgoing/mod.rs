pub mod stock_ledger_postgres;
