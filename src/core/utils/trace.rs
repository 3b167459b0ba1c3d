use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::Registry;

use tracing_subscriber::{
   EnvFilter, fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt,
};

const LOG_DIR: &str = "./logs";

pub fn setup_tracing() -> (WorkerGuard, WorkerGuard) {
   let trace_appender = tracing_appender::rolling::daily(LOG_DIR, "trace.log");
   let output_appender = tracing_appender::rolling::daily(LOG_DIR, "output.log");

   let (trace_writer, trace_guard) = tracing_appender::non_blocking(trace_appender);
   let (output_writer, output_guard) = tracing_appender::non_blocking(output_appender);

   // RUST_LOG only overrides the console, the files always keep the full picture
   let console_filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new("fwallet_store=warn,fwallet=info"));
   let trace_filter = EnvFilter::new("fwallet_store=trace,fwallet=trace");
   let output_filter = EnvFilter::new("fwallet_store=info,fwallet=info");

   let console_layer = fmt::layer()
      .with_writer(std::io::stderr)
      .with_filter(console_filter);

   let trace_layer = fmt::layer()
      .with_writer(trace_writer)
      .with_ansi(false)
      .with_filter(trace_filter);

   let output_layer = fmt::layer()
      .with_writer(output_writer)
      .with_ansi(false)
      .with_filter(output_filter);

   Registry::default()
      .with(trace_layer)
      .with(console_layer)
      .with(output_layer)
      .init();

   (trace_guard, output_guard)
}
