pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个缓存插件
///
/// 借助 ctor 在 main 之前完成注册，新插件只需一行声明。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $type:ty) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $type:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$type>::default();
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}
