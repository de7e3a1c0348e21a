use anyhow::Result;
use tracing_subscriber::EnvFilter;

use pagepool::buffer::manager::BufferPoolManager;
use pagepool::config::PoolConfig;
use pagepool::storage::entity::PageId;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // config
    let config = match std::env::args().nth(1) {
        Some(path) => PoolConfig::load(path)?,
        None => PoolConfig::default(),
    };
    let mut bufmgr = config.open_pool()?;

    // プールの容量より多くのページに書き込んで追い出しを起こす
    for page in 0..(config.capacity as u64 * 2) {
        let handle = bufmgr.pin(PageId(page))?;
        {
            let mut data = handle.data_mut();
            let text = format!("page {}", page);
            data[..text.len()].copy_from_slice(text.as_bytes());
        }
        bufmgr.mark_dirty(&handle)?;
        bufmgr.unpin(&handle)?;
    }

    let stats = bufmgr.stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);
    bufmgr.shutdown()?;

    Ok(())
}
