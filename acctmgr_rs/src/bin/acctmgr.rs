use std::any::Any;
use std::panic;
use std::process::{self, ExitCode};

fn is_broken_pipe(payload: &(dyn Any + Send)) -> bool {
    let msg = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
    msg.is_some_and(|m| m.contains("Broken pipe"))
}

fn main() -> ExitCode {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // `acctmgr list cluster | head` closes stdout early
        if is_broken_pipe(info.payload()) {
            process::exit(0);
        }
        default_hook(info);
    }));

    acctmgr::cli::entrypoint::run()
}
