pub mod launch_summary;
