pub mod cli_ops;
pub mod config;
pub mod data_uri;
pub mod decode;
pub mod file_io;
pub mod output;
pub mod path_reconstruct;
pub mod report;
pub mod sm_parse;
pub mod storage;
pub mod unpack;
pub mod webpack;

pub use cli_ops::{handle_unpack, unpack_all, CLIError, FailedMap, RunReport};
pub use config::{AssetKind, UnpackConfig};
pub use data_uri::{decode_data_uri, DataUri, DataUriError};
pub use decode::{decode_content, DecodeNote, DecodedContent};
pub use file_io::{find_map_files, FileAnalysisError};
pub use output::ensure_output_dir;
pub use path_reconstruct::{extname, resolve_module_path, Resolution, ResolvedTarget, SkipReason};
pub use report::{Event, LogReporter, MemoryReporter, Reporter};
pub use sm_parse::{load_map_file, map_entries, parse_sourcemap, sources_list, MapEntry, SourcemapError};
pub use storage::{AssetStore, FsStore, MemoryStore, StoreError};
pub use unpack::{unpack_entries, unpack_entry, unpack_map, EntryOutcome, MapSummary};
pub use webpack::extract_module_export;
