//! The shim script set: JavaScript substitutes injected into every
//! loaded document so page code sees host capabilities instead of the
//! engine defaults.

use std::borrow::Cow;

use kiosk_config::PageConfig;

/// When a shim runs relative to document parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTiming {
    /// Before any page script executes, in every fresh document context.
    DocumentStart,
    /// After the initial parse, when the DOM is queryable.
    DocumentEnd,
}

/// Which frames of the document a shim applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameScope {
    TopFrame,
    AllFrames,
}

/// One injected script. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ShimScript {
    pub source: Cow<'static, str>,
    pub timing: InjectionTiming,
    pub scope: FrameScope,
}

impl ShimScript {
    pub fn document_start(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            timing: InjectionTiming::DocumentStart,
            scope: FrameScope::TopFrame,
        }
    }

    pub fn document_end(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            timing: InjectionTiming::DocumentEnd,
            scope: FrameScope::TopFrame,
        }
    }

    pub fn all_frames(mut self) -> Self {
        self.scope = FrameScope::AllFrames;
        self
    }
}

/// Fake `window.app` namespace. The link-interception shim routes
/// through it, and page code may call it directly.
const APP_NAMESPACE_SHIM: &str = "window.app={openExternal:function(url){window.ipc.postMessage(JSON.stringify({name:'openExternal',body:url}))},openInternal:function(url){window.ipc.postMessage(JSON.stringify({name:'open',body:url}))}};";

/// Replacement `Notification` constructor. Absent options are dropped
/// by `JSON.stringify`, which the native side reads as the
/// `"undefined"` sentinel.
const NOTIFICATION_SHIM: &str = "function _Notification(title,options){options=options||{};window.ipc.postMessage(JSON.stringify({name:'notification',body:{title:title,body:options['body'],icon:options['icon']}}))}_Notification.length=1;_Notification.permission='granted';_Notification.requestPermission=function(callback){if(typeof callback==='function'){callback(_Notification.permission)}};window.Notification=_Notification;";

/// console.log/warn/error relay. Rides the notification channel with a
/// bare string body; the dispatcher tells the two apart by payload
/// shape.
const CONSOLE_SHIM: &str = "var console={log:function(){var message='';for(var i=0;i<arguments.length;i++){message+=arguments[i]+' '}window.ipc.postMessage(JSON.stringify({name:'notification',body:message}))},warn:function(){var message='';for(var i=0;i<arguments.length;i++){message+=arguments[i]+' '}window.ipc.postMessage(JSON.stringify({name:'notification',body:message}))},error:function(){var message='';for(var i=0;i<arguments.length;i++){message+=arguments[i]+' '}window.ipc.postMessage(JSON.stringify({name:'notification',body:message}))}};";

/// Static battery fallback. `getBattery()`'s thenable resolves to the
/// static object and is never wired to the native battery handler; the
/// native result only arrives as a later `navigator.battery`
/// reassignment.
const BATTERY_SHIM: &str = "navigator.battery={charging:true,chargingTime:0,dischargingTime:999,level:1,addEventListener:function(type,listener){}};navigator.getBattery=function(){return{charging:true,chargingTime:0,dischargingTime:999,level:1,addEventListener:function(type,listener){},then:function(call){return call(navigator.battery)}}};";

/// target=_blank interception, external-browser branch.
const LINK_TARGET_EXTERNAL_SHIM: &str = "var links=document.querySelectorAll('a');for(var i=0;i<links.length;i++){if(links[i].target==='_blank'){links[i].addEventListener('click',function(event){event.preventDefault();app.openExternal(this.href)})}}";

/// target=_blank interception, in-place branch.
const LINK_TARGET_INTERNAL_SHIM: &str = "var links=document.querySelectorAll('a');for(var i=0;i<links.length;i++){if(links[i].target==='_blank'){links[i].addEventListener('click',function(event){event.preventDefault();app.openInternal(this.href)})}}";

/// Build the fixed ordered shim set for a page configuration.
///
/// The app namespace comes first (link interception depends on it); the
/// console relay is present only when enabled; the link-interception
/// branch follows the new-screen policy. Everything else is
/// unconditional.
pub fn shim_set(page: &PageConfig) -> Vec<ShimScript> {
    let mut shims = vec![
        ShimScript::document_start(APP_NAMESPACE_SHIM),
        ShimScript::document_start(NOTIFICATION_SHIM),
    ];

    if page.console_support {
        shims.push(ShimScript::document_start(CONSOLE_SHIM));
    }

    shims.push(ShimScript::document_start(BATTERY_SHIM));

    let link_shim = if page.open_in_new_screen {
        LINK_TARGET_EXTERNAL_SHIM
    } else {
        LINK_TARGET_INTERNAL_SHIM
    };
    shims.push(ShimScript::document_end(link_shim));

    shims
}
