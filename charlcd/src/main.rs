use charlcd_port::PortRegister;
use charlcd_port::delay::SleepDelay;
use charlcd_port::lcd::hd44780::driver::{Hd44780Driver, PortHd44780Driver};
use charlcd_port::raw::RawPortRegister;
use charlcd_port::soft::SoftPortRegister;
use dotenv::dotenv;
use log::{debug, info};
use std::env::var;
use std::thread;
use std::time::Duration;
use sysinfo::System;

fn parse_number(s: &str) -> eyre::Result<u64> {
    let s = s.trim();
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16)?,
        None => s.parse()?,
    };
    Ok(value)
}

fn main() -> eyre::Result<()> {
    // Initialize environment and logger
    dotenv().ok();
    pretty_env_logger::init();

    const UNKNOWN_STR: &str = "???";

    info!("charlcd starting...");
    info!(
        "Running on {} ({}), kernel {}",
        System::name().as_deref().unwrap_or(UNKNOWN_STR),
        System::cpu_arch(),
        System::kernel_version().as_deref().unwrap_or(UNKNOWN_STR),
    );

    debug!("Initializing port register...");
    let backend = var("CHARLCD_BACKEND").unwrap_or_else(|_| "raw".to_string());
    let port: Box<dyn PortRegister> = match backend.as_str() {
        "soft" => {
            info!("Using soft port register (dry run, nothing is driven)");
            Box::new(SoftPortRegister::new())
        }
        "raw" => {
            let base = parse_number(&var("CHARLCD_PORT_BASE")?)?;
            let data_offset = parse_number(&var("CHARLCD_PORT_DATA_OFFSET")?)? as usize;
            let dir_offset = parse_number(&var("CHARLCD_PORT_DIR_OFFSET")?)? as usize;
            let path = var("CHARLCD_PORT_PATH").ok();

            info!(
                "Port @ {} base {:#x}, data +{:#x}, dir +{:#x}",
                path.as_deref().unwrap_or("/dev/mem"),
                base,
                data_offset,
                dir_offset
            );

            let register = match path {
                Some(path) => RawPortRegister::new_at(&path, base, data_offset, dir_offset)?,
                None => RawPortRegister::new_mem(base, data_offset, dir_offset)?,
            };
            Box::new(register)
        }
        other => return Err(eyre::eyre!("Unknown backend {other:?}")),
    };
    debug!("{:?} initialized.", port);

    let delay = SleepDelay::new();

    debug!("Initializing LCD driver...");
    let mut lcd = PortHd44780Driver::new(&*port, &delay);

    lcd.init()?;
    debug!("{:?} initialized.", lcd);

    lcd.write_str("hello")?;
    lcd.write_str_at(2, 5, "bye")?;

    info!("Text written, idling.");

    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
